//! Defensive input helpers.
//!
//! Everything here is advisory: sanitizers neutralize markup and
//! SQL-looking tokens, the detector and rate limiter report, and the
//! caller decides policy. None of it replaces server-side validation
//! or parameterized queries.

pub mod rate_limit;
pub mod sanitize;
pub mod token;

pub use rate_limit::RateLimiter;
pub use sanitize::{detect_xss_attempt, sanitize_input, sanitize_search_query};
pub use token::{generate_token, sha256_hex};

/// Record a security-relevant event.
///
/// Emits a structured warning on the `security` target. In the original
/// site this also shipped the event to a collection endpoint; here the
/// subscriber decides where the record goes.
pub fn log_security_event(event: &str, details: &str) {
    tracing::warn!(
        target: "security",
        event,
        details,
        timestamp = %chrono::Utc::now().to_rfc3339(),
        "security event"
    );
}
