// Cached lookup result.
// One entry per query key: the profile and the first repository page.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::{Profile, Repository};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// When the lookup was captured.
    pub captured_at: DateTime<Utc>,
    pub profile: Profile,
    /// First page only; load-more pages are never cached.
    pub repositories: Vec<Repository>,
}

impl CacheEntry {
    /// Create an entry captured now.
    pub fn new(profile: Profile, repositories: Vec<Repository>) -> Self {
        Self {
            captured_at: Utc::now(),
            profile,
            repositories,
        }
    }

    /// Age of the entry relative to `now`. Future timestamps count as zero.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.captured_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// An entry is valid only while its age is strictly below the TTL.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.age(now) >= ttl
    }

    pub fn is_valid(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        !self.is_expired(ttl, now)
    }
}
