//! Sliding-window call limiter keyed by caller.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub max_calls: usize,
    pub window: Duration,
}

impl RateLimit {
    pub const fn per_millis(max_calls: usize, window_ms: u64) -> Self {
        RateLimit {
            max_calls,
            window: Duration::from_millis(window_ms),
        }
    }
}

// max 5 reads per second per rep
pub const READ_APPOINTMENTS: RateLimit = RateLimit::per_millis(5, 1_000);
// max 1 write per second
pub const WRITE_APPOINTMENT: RateLimit = RateLimit::per_millis(1, 1_000);
// max 10 reads total per 10 seconds
pub const TOTAL_READS: RateLimit = RateLimit::per_millis(10, 10_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimits {
    pub read: RateLimit,
    pub write: RateLimit,
    pub total_reads: RateLimit,
}

impl Default for RateLimits {
    fn default() -> Self {
        RateLimits {
            read: READ_APPOINTMENTS,
            write: WRITE_APPOINTMENT,
            total_reads: TOTAL_READS,
        }
    }
}

#[derive(Debug)]
struct Window {
    span: Duration,
    hits: Vec<Instant>,
}

impl Window {
    fn prune(&mut self, now: Instant) {
        let span = self.span;
        self.hits.retain(|t| now.duration_since(*t) < span);
    }
}

#[derive(Debug)]
struct Ledger {
    windows: HashMap<String, Window>,
    last_sweep: Instant,
}

impl Ledger {
    /// Drops keys with no calls left inside their window.
    fn sweep(&mut self, now: Instant) {
        self.windows.retain(|_, window| {
            window.prune(now);
            !window.hits.is_empty()
        });
        self.last_sweep = now;
    }
}

#[derive(Debug)]
pub struct RateLimiter {
    ledger: Mutex<Ledger>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        RateLimiter {
            ledger: Mutex::new(Ledger {
                windows: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a call for `key` and returns whether it is allowed.
    /// Rejected calls are not recorded.
    pub fn try_acquire(&self, key: &str, limit: RateLimit) -> bool {
        self.try_acquire_all(&[(key, limit)]).is_ok()
    }

    /// Records one call against every key, or none of them if any key is
    /// over its limit. Returns the first key that rejected the call.
    pub fn try_acquire_all<'a>(&self, checks: &[(&'a str, RateLimit)]) -> Result<(), &'a str> {
        let now = Instant::now();
        let mut ledger = self.ledger.lock().unwrap_or_else(|e| e.into_inner());

        let shortest = checks.iter().map(|(_, limit)| limit.window).min();
        if shortest.is_some_and(|span| now.duration_since(ledger.last_sweep) >= span) {
            ledger.sweep(now);
        }

        for (key, limit) in checks {
            let recent = match ledger.windows.get_mut(*key) {
                Some(window) => {
                    window.prune(now);
                    window.hits.len()
                }
                None => 0,
            };
            if recent >= limit.max_calls {
                warn!(
                    "rate limit exceeded for {}: {} calls in {:?}",
                    key, recent, limit.window
                );
                return Err(*key);
            }
        }

        for (key, limit) in checks {
            let window = ledger.windows.entry((*key).to_string()).or_insert_with(|| Window {
                span: limit.window,
                hits: Vec::new(),
            });
            window.span = window.span.max(limit.window);
            window.hits.push(now);
        }
        Ok(())
    }
}
