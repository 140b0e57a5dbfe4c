//! Generic call-rate limiter for interactive event handlers.
//!
//! Bounds a wrapped operation to at most `calls` invocations per rolling
//! `period`. Over-budget invocations are dropped silently rather than
//! reported as errors, so a burst of UI events never surfaces a failure.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    count: u32,
    started: Instant,
}

/// Shared rolling-window call limiter.
///
/// One instance is typically shared (behind an `Arc`) by every handler
/// that can trigger a network request, so that together they stay under
/// the budget. The internal lock is held only for the check/reset/increment
/// bookkeeping, never while the wrapped operation runs, so the operation
/// may itself call back into the limiter.
#[derive(Debug)]
pub struct RateLimiter {
    calls: u32,
    period: Duration,
    window: Mutex<Window>,
}

impl RateLimiter {
    /// `calls` is clamped to a minimum of 1.
    pub fn new(calls: i64, period: Duration) -> Self {
        Self {
            calls: calls.max(1) as u32,
            period,
            window: Mutex::new(Window {
                count: 0,
                started: Instant::now(),
            }),
        }
    }

    /// Effective per-window call budget.
    pub fn calls(&self) -> u32 {
        self.calls
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run `op` if the current window still has budget.
    ///
    /// Returns `Some` with the operation's result, or `None` when the call
    /// was dropped.
    pub fn call<T>(&self, op: impl FnOnce() -> T) -> Option<T> {
        {
            // Nothing panics while the lock is held, and the counter state
            // stays valid either way, so clear any poison.
            let mut window = self.window.lock().unwrap_or_else(PoisonError::into_inner);
            let now = Instant::now();
            if now.duration_since(window.started) >= self.period {
                window.count = 0;
                window.started = now;
            }
            window.count = window.count.saturating_add(1);
            if window.count > self.calls {
                return None;
            }
        }
        Some(op())
    }
}
