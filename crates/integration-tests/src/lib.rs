//! Shared helpers for the Sipayi integration tests.
//!
//! The actual tests live in `tests/`; this library only provides the
//! session fixture they all start from.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use sipayi_session::{MemoryStore, RecordingNotifier, Session, SessionConfig};

/// A fresh in-memory session with zero submission latency, so tests
/// exercise the real submission path without waiting out the simulated
/// network hop.
#[must_use]
pub fn test_session() -> Session<MemoryStore, RecordingNotifier> {
    let config = SessionConfig {
        submit_latency: Duration::ZERO,
        ..SessionConfig::default()
    };
    Session::new(MemoryStore::new(), RecordingNotifier::new(), config)
}
