//! Sliding-window rate limiter.
//!
//! One limiter instance guards one action (a contact form, a search
//! box). State is the set of admission timestamps still inside the
//! window; the limiter is advisory — it reports, the caller blocks.

use std::time::{Duration, Instant};

use super::log_security_event;

/// Sliding-window counter over `(max_requests, window)`.
///
/// Not thread-safe by contract: one instance per guarded action, driven
/// from a single owner.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    requests: Vec<Instant>,
}

impl RateLimiter {
    /// Create a limiter admitting at most `max_requests` per `window`.
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: Vec::with_capacity(max_requests),
        }
    }

    fn prune(&mut self, now: Instant) {
        self.requests
            .retain(|t| now.duration_since(*t) < self.window);
    }

    /// Try to admit a request now.
    ///
    /// Prunes timestamps that have left the window, then admits and
    /// records iff fewer than the maximum remain. A denied request is
    /// not recorded and does not extend anyone's wait.
    pub fn can_make_request(&mut self) -> bool {
        let now = Instant::now();
        self.prune(now);

        if self.requests.len() < self.max_requests {
            self.requests.push(now);
            return true;
        }

        log_security_event("rate_limit_exceeded", "request denied by sliding window");
        false
    }

    /// Time until the next request would be admitted.
    ///
    /// Zero while under the limit; otherwise the time until the oldest
    /// recorded admission exits the window. Never negative.
    pub fn remaining_time(&mut self) -> Duration {
        let now = Instant::now();
        self.prune(now);

        if self.requests.len() < self.max_requests {
            return Duration::ZERO;
        }

        self.requests
            .iter()
            .min()
            .map_or(Duration::ZERO, |oldest| {
                self.window.saturating_sub(now.duration_since(*oldest))
            })
    }
}
