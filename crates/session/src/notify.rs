//! Fire-and-forget seam to the UI layer.
//!
//! The page shows a transient toast and a cart-count badge; this crate
//! only announces, never renders. Implementations must return quickly
//! and must not fail — the core never blocks on the UI.

use std::sync::Mutex;

/// Receiver for user-facing announcements.
pub trait Notifier {
    /// Show a transient message ("Tea added to cart!").
    fn notify(&self, message: &str);

    /// Refresh the cart-count badge.
    fn refresh_count(&self, count: u32);
}

/// Default notifier that logs announcements via `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(message, "notification");
    }

    fn refresh_count(&self, count: u32) {
        tracing::debug!(count, "cart count refreshed");
    }
}

/// Notifier that drops everything. For embedders with no UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str) {}

    fn refresh_count(&self, _count: u32) {}
}

/// Notifier that records every call, for asserting on UI side effects.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    counts: Mutex<Vec<u32>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages shown so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// All badge refreshes so far.
    #[must_use]
    pub fn counts(&self) -> Vec<u32> {
        self.counts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(message.to_owned());
    }

    fn refresh_count(&self, count: u32) {
        self.counts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(count);
    }
}
