//! Fetch orchestration.
//!
//! Decides whether a lookup is served from the cache or the network,
//! sequences the profile and repository requests, advances the pagination
//! cursor, and keeps request/cache-hit accounting.
//!
//! Resolutions for the same query key are serialized; a second lookup for a
//! key waits for the first one and then usually hits the cache it wrote.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, CacheStore, MemoryStore};
use crate::config::LensConfig;
use crate::error::Result;
use crate::github::{GitHubClient, Profile, ProfileLookup, Upstream};
use crate::state::{Cursor, Metrics, MetricsSnapshot, QueryKey, Session, Snapshot};

/// How a resolution completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Blank or malformed query; nothing happened.
    Skipped,
    /// Served from a valid cache entry.
    CacheHit { repositories: usize },
    /// Fetched from upstream.
    Fetched {
        page: u32,
        fetched: usize,
        has_more: bool,
    },
    /// Upstream has no such user.
    UserNotFound,
}

type KeyLock = Arc<tokio::sync::Mutex<()>>;

pub struct Orchestrator<U, S> {
    upstream: U,
    store: Arc<S>,
    ttl: Duration,
    page_size: u32,
    metrics: Metrics,
    session: Mutex<Session>,
    in_flight: Mutex<HashMap<QueryKey, KeyLock>>,
}

impl Orchestrator<GitHubClient, MemoryStore> {
    /// GitHub-backed orchestrator with a session-scoped memory cache.
    pub fn github(config: &LensConfig) -> Result<Self> {
        let client = GitHubClient::new(config)?;
        Ok(Self::new(client, Arc::new(MemoryStore::new()), config))
    }
}

impl<U: Upstream, S: CacheStore> Orchestrator<U, S> {
    pub fn new(upstream: U, store: Arc<S>, config: &LensConfig) -> Self {
        Self {
            upstream,
            store,
            ttl: config.ttl(),
            page_size: config.page_size,
            metrics: Metrics::new(),
            session: Mutex::new(Session::default()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn cursor(&self) -> Cursor {
        self.session().cursor
    }

    /// Copy of everything the presentation layer renders.
    pub fn snapshot(&self) -> Snapshot {
        let session = self.session();
        Snapshot {
            query: session.query.clone(),
            profile: session.profile.clone(),
            repositories: session.repositories.clone(),
            cursor: session.cursor,
            metrics: self.metrics.snapshot(),
            last_error: session.last_error.clone(),
        }
    }

    /// Fresh lookup of `query`, first page.
    pub async fn search(&self, query: &str) -> Result<Resolution> {
        self.resolve(query, 1, false).await
    }

    /// Fetch the next page of the current lookup, if more may exist.
    pub async fn load_more(&self) -> Result<Resolution> {
        let (key, next_page) = {
            let session = self.session();
            match &session.query {
                Some(key) if session.cursor.can_load_more() => {
                    (key.clone(), session.cursor.next_page())
                }
                _ => return Ok(Resolution::Skipped),
            }
        };
        self.resolve(key.as_str(), next_page, true).await
    }

    /// Resolve `query` for `page`. `load_more` marks a pagination continuation,
    /// which bypasses the cache and appends to the current listing.
    ///
    /// On error the visible session and the cache are left as they were; the
    /// message is kept in `Snapshot::last_error`.
    pub async fn resolve(&self, query: &str, page: u32, load_more: bool) -> Result<Resolution> {
        let Some(key) = QueryKey::parse(query) else {
            return Ok(Resolution::Skipped);
        };

        self.metrics.record_request();

        let lock = self.key_lock(&key);
        let result = {
            let _in_flight = lock.lock().await;
            self.resolve_locked(&key, page.max(1), load_more).await
        };
        self.release_key_lock(&key, lock);

        if let Err(e) = &result {
            warn!(%key, page, error = %e, "resolution failed");
            self.session().record_error(e.to_string());
        }
        result
    }

    async fn resolve_locked(
        &self,
        key: &QueryKey,
        page: u32,
        load_more: bool,
    ) -> Result<Resolution> {
        if !load_more {
            if let Some(hit) = self.try_cache(key) {
                return Ok(hit);
            }
        }

        let profile = match self.held_profile(key, load_more) {
            Some(profile) => profile,
            None => {
                self.metrics.record_api_call();
                debug!(%key, "fetching profile");
                match self.upstream.fetch_profile(key.as_str()).await? {
                    ProfileLookup::Found(profile) => profile,
                    ProfileLookup::NotFound => {
                        info!(%key, "user not found");
                        self.session().show_not_found(key.clone());
                        return Ok(Resolution::UserNotFound);
                    }
                }
            }
        };

        self.metrics.record_api_call();
        let repositories = self
            .upstream
            .fetch_repositories(key.as_str(), page, self.page_size)
            .await?;
        let fetched = repositories.len();
        let cursor = Cursor::after_page(page, fetched, self.page_size);

        if load_more {
            self.session()
                .append_page(key.clone(), profile, repositories, cursor);
        } else {
            // The cache only ever holds the first page.
            if page == 1 {
                let entry = CacheEntry::new(profile.clone(), repositories.clone());
                if let Err(e) = self.store.set(key.as_str(), &entry) {
                    warn!(%key, error = %e, "failed to write cache entry");
                }
            }
            self.session()
                .show_first_page(key.clone(), profile, repositories, cursor);
        }

        info!(%key, page, fetched, "page fetched");
        Ok(Resolution::Fetched {
            page,
            fetched,
            has_more: cursor.can_load_more(),
        })
    }

    /// Serve a valid cache entry, evicting an expired one.
    fn try_cache(&self, key: &QueryKey) -> Option<Resolution> {
        debug!(%key, "checking cache");
        let entry = match self.store.get(key.as_str()) {
            Ok(entry) => entry?,
            Err(e) => {
                warn!(%key, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };

        let now = Utc::now();
        if entry.is_expired(self.ttl, now) {
            debug!(%key, age_secs = entry.age(now).as_secs(), "evicting stale cache entry");
            if let Err(e) = self.store.delete(key.as_str()) {
                warn!(%key, error = %e, "failed to evict stale cache entry");
            }
            return None;
        }

        self.metrics.record_cache_hit();
        let repositories = entry.repositories.len();
        let cursor = Cursor::after_page(1, repositories, self.page_size);
        self.session()
            .show_first_page(key.clone(), entry.profile, entry.repositories, cursor);

        info!(%key, repositories, "served from cache");
        Some(Resolution::CacheHit { repositories })
    }

    /// Profile to reuse on a continuation; fresh lookups always refetch.
    fn held_profile(&self, key: &QueryKey, load_more: bool) -> Option<Profile> {
        if !load_more {
            return None;
        }
        self.session().profile_for(key).cloned()
    }

    fn key_lock(&self, key: &QueryKey) -> KeyLock {
        self.in_flight_locks()
            .entry(key.clone())
            .or_default()
            .clone()
    }

    /// Drop the map entry once no other resolution holds or waits on it.
    fn release_key_lock(&self, key: &QueryKey, lock: KeyLock) {
        let mut locks = self.in_flight_locks();
        if Arc::strong_count(&lock) == 2 {
            locks.remove(key);
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn in_flight_locks(&self) -> MutexGuard<'_, HashMap<QueryKey, KeyLock>> {
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.in_flight_locks().len()
    }
}
