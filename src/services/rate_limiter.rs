//! Fixed-window request limiter keyed by caller identifier.
//!
//! Each caller gets `limit` requests per window. The window is reset (not
//! slid) once the current instant reaches the stored reset instant, and a new
//! window always ends exactly one window length after the reset.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WindowState {
    count: u32,
    reset_at: Instant,
}

#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    windows: Mutex<HashMap<String, WindowState>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Counts one request for `caller_id`; `false` when the caller is over the limit.
    pub fn check_and_consume(&self, caller_id: &str) -> bool {
        self.check_and_consume_at(caller_id, Instant::now())
    }

    /// Same as [`Self::check_and_consume`] against an explicit clock reading.
    pub fn check_and_consume_at(&self, caller_id: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        let mut state = windows.get(caller_id).copied().unwrap_or(WindowState {
            count: 0,
            reset_at: now + self.window,
        });

        if now >= state.reset_at {
            state.count = 0;
            state.reset_at = now + self.window;
        }

        // Denied requests leave the stored window untouched.
        if state.count >= self.limit {
            return false;
        }

        state.count += 1;
        windows.insert(caller_id.to_string(), state);
        true
    }

    #[must_use]
    pub fn tracked_callers(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
