use std::{
    num::NonZeroUsize,
    time::{Duration, Instant},
};

use chrono::Utc;
use lru::LruCache;
use parking_lot::Mutex;

const FALLBACK_MAX_CLIENTS: usize = 500;

/// Outcome of one admission check.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    /// Epoch milliseconds at which the client's window resets.
    pub reset_at_epoch_ms: i64,
}

impl RateLimitDecision {
    /// Seconds until the window resets, rounded up, never below one.
    pub fn retry_after_secs(&self) -> u64 {
        let remaining_ms = (self.reset_at_epoch_ms - Utc::now().timestamp_millis()).max(0) as u64;
        remaining_ms.div_ceil(1000).max(1)
    }
}

#[derive(Debug)]
struct ClientEntry {
    count: u32,
    window_start: Instant,
    reset_at_epoch_ms: i64,
}

/// Fixed-window request counter keyed by client identifier.
///
/// The backing table is a capacity-bounded LRU cache: when more distinct
/// identifiers are seen than the configured capacity, the least recently
/// seen one is evicted and its quota forgotten. Entries whose window has
/// elapsed are reset lazily on the next lookup, which is the TTL behavior
/// the admission contract requires.
///
/// `check` never fails. Concurrent callers serialize on one lock, so
/// counts are not lost; the remaining race (two requests admitted before
/// either increment lands) is accepted admission-control slack, not
/// corruption.
pub struct SlidingWindowLimiter {
    clients: Mutex<LruCache<String, ClientEntry>>,
    window: Duration,
}

impl SlidingWindowLimiter {
    pub fn new(window: Duration, max_clients: usize) -> Self {
        let capacity = NonZeroUsize::new(max_clients)
            .unwrap_or(NonZeroUsize::new(FALLBACK_MAX_CLIENTS).unwrap());
        SlidingWindowLimiter {
            clients: Mutex::new(LruCache::new(capacity)),
            window,
        }
    }

    /// Admit or reject one request from `client_id` under a cap of
    /// `max_requests` per window. A rejected request does not increment
    /// the stored count.
    pub fn check(&self, max_requests: u32, client_id: &str) -> RateLimitDecision {
        let now = Instant::now();
        let mut clients = self.clients.lock();

        let expired = clients
            .get(client_id)
            .is_none_or(|entry| now.duration_since(entry.window_start) >= self.window);
        if expired {
            clients.put(
                client_id.to_string(),
                ClientEntry {
                    count: 0,
                    window_start: now,
                    reset_at_epoch_ms: Utc::now().timestamp_millis()
                        + self.window.as_millis() as i64,
                },
            );
        }

        let Some(entry) = clients.get_mut(client_id) else {
            // Unreachable with a non-zero capacity; keep the gate open
            // rather than panic inside the admission path.
            return RateLimitDecision {
                allowed: true,
                remaining: max_requests.saturating_sub(1),
                reset_at_epoch_ms: Utc::now().timestamp_millis() + self.window.as_millis() as i64,
            };
        };

        if entry.count >= max_requests {
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                reset_at_epoch_ms: entry.reset_at_epoch_ms,
            };
        }

        entry.count += 1;
        RateLimitDecision {
            allowed: true,
            remaining: max_requests - entry.count,
            reset_at_epoch_ms: entry.reset_at_epoch_ms,
        }
    }
}
