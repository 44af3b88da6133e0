use chrono::{DateTime, TimeDelta, Utc};

/// Sliding-window count of accepted commands for one region.
///
/// A breach is a flow-control outcome (throttle), never a safety rejection;
/// the throttled command still records, since the caller is expected to
/// deliver it paced rather than drop it.
#[derive(Debug, Default)]
pub struct RateLimiter {
    timestamps: Vec<DateTime<Utc>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            timestamps: Vec::new(),
        }
    }

    /// Whether accepting one more message at `at` would exceed `max_count`
    /// inside the window. Evicts expired entries first.
    pub fn would_exceed(&mut self, max_count: u32, window: TimeDelta, at: DateTime<Utc>) -> bool {
        self.evict(at, window);
        self.timestamps.len() >= max_count as usize
    }

    /// Record an accepted message.
    pub fn record(&mut self, at: DateTime<Utc>) {
        self.timestamps.push(at);
    }

    /// Count of accepted messages currently inside the window.
    pub fn count(&self) -> usize {
        self.timestamps.len()
    }

    fn evict(&mut self, at: DateTime<Utc>, window: TimeDelta) {
        let cutoff = at - window;
        self.timestamps.retain(|t| *t > cutoff);
    }
}
