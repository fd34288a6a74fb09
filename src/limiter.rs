use std::time::{Duration, Instant};

/// Debounce gate for rate-limited dispatches.
///
/// Starts in the "window already elapsed" state. The recorded timestamp only
/// moves forward.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    window: Duration,
    last: Option<Instant>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Returns `true` if at least the debounce window has passed since the
    /// last recorded dispatch. Does not record anything.
    #[must_use]
    pub fn try_consume(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.window,
        }
    }

    /// Record a dispatch initiated at `now`. Earlier timestamps are ignored.
    pub fn mark_consumed(&mut self, now: Instant) {
        self.last = Some(match self.last {
            Some(last) if last > now => last,
            _ => now,
        });
    }

    #[must_use]
    pub fn last_consumed(&self) -> Option<Instant> {
        self.last
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }
}
