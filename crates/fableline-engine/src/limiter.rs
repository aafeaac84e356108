//! Per-caller rate limiting.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use fableline_core::caller::CallerId;
use fableline_core::clock::Clock;

/// One caller's current window.
#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started_at: DateTime<Utc>,
}

/// Per-caller request limiter with fixed-window reset semantics.
///
/// A caller's counter resets only once their window start plus the window
/// length has elapsed at check time. This is a fixed-window approximation,
/// not a true sliding window: back-to-back windows can admit a brief burst
/// of up to twice the limit at the boundary. The behavior is intentional
/// and must not be tightened without updating the callers' documented
/// expectations.
///
/// The map is bounded: at `capacity`, expired windows are dropped and, if
/// none have expired, the oldest window is evicted.
#[derive(Debug)]
pub struct RateLimiter {
    clock: Arc<dyn Clock>,
    capacity: usize,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    /// Creates a limiter tracking at most `capacity` callers.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, capacity: usize) -> Self {
        assert!(capacity > 0, "rate limiter capacity must be non-zero");
        Self {
            clock,
            capacity,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Records one request for `caller` and returns whether it is within
    /// `max_requests` per `window`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn check(&self, caller: &CallerId, max_requests: u32, window: Duration) -> bool {
        let now = self.clock.now();
        let mut windows = self.windows.lock().unwrap();

        if !windows.contains_key(caller.as_str()) && windows.len() >= self.capacity {
            Self::evict(&mut windows, now, window);
        }

        let entry = windows
            .entry(caller.as_str().to_owned())
            .and_modify(|w| {
                if now - w.started_at > window {
                    *w = Window {
                        count: 0,
                        started_at: now,
                    };
                }
            })
            .or_insert(Window {
                count: 0,
                started_at: now,
            });

        entry.count += 1;
        let allowed = entry.count <= max_requests;

        if !allowed {
            warn!(caller = %caller, count = entry.count, max_requests, "rate limit exceeded");
        }

        allowed
    }

    /// Drops expired windows; if none have expired, drops the oldest one.
    fn evict(windows: &mut HashMap<String, Window>, now: DateTime<Utc>, window: Duration) {
        let before = windows.len();
        windows.retain(|_, w| now - w.started_at <= window);

        if windows.len() == before
            && let Some(oldest) = windows
                .iter()
                .min_by_key(|(_, w)| w.started_at)
                .map(|(caller, _)| caller.clone())
        {
            windows.remove(&oldest);
        }
    }
}
