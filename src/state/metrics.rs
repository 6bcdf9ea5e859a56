// Request and cache accounting.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Process-lifetime counters. Never decrease, never persisted.
#[derive(Debug, Default)]
pub struct Metrics {
    total_requests: AtomicU64,
    cache_hits: AtomicU64,
    api_calls: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_api_call(&self) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            api_calls: self.api_calls.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub api_calls: u64,
}

impl MetricsSnapshot {
    /// Cache hits as a percentage of requests, rounded to 2 decimals.
    pub fn cache_hit_ratio(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        let ratio = self.cache_hits as f64 / self.total_requests as f64 * 100.0;
        (ratio * 100.0).round() / 100.0
    }
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API calls: {} | Cache hits: {} | Total requests: {} | Cache hit rate: {:.2}%",
            self.api_calls,
            self.cache_hits,
            self.total_requests,
            self.cache_hit_ratio()
        )
    }
}
