// Test fixtures and a scripted upstream.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{LensError, Result};
use crate::github::{Profile, ProfileLookup, Repository, Upstream};

pub fn profile(login: &str) -> Profile {
    Profile {
        login: login.to_string(),
        id: 1,
        name: None,
        avatar_url: None,
        bio: None,
        followers: 100,
        following: 0,
        public_repos: 0,
        location: None,
        html_url: Some(format!("https://github.com/{}", login)),
    }
}

pub fn repositories(count: usize) -> Vec<Repository> {
    repositories_from(0, count)
}

pub fn repositories_from(first_id: u64, count: usize) -> Vec<Repository> {
    (first_id..first_id + count as u64)
        .map(|id| Repository {
            id,
            name: format!("repo-{}", id),
            html_url: format!("https://github.com/octocat/repo-{}", id),
            description: None,
            stargazers_count: id,
            forks_count: 0,
            updated_at: None,
        })
        .collect()
}

/// Upstream double with canned profiles and per-call repository pages.
#[derive(Default)]
pub struct FakeUpstream {
    profiles: HashMap<String, Profile>,
    pages: Mutex<VecDeque<Result<Vec<Repository>>>>,
    fail_profile: Mutex<bool>,
    pub profile_calls: AtomicUsize,
    pub repo_calls: AtomicUsize,
    pub requested_pages: Mutex<Vec<u32>>,
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, login: &str) -> Self {
        self.profiles.insert(login.to_string(), profile(login));
        self
    }

    /// Queue the response for the next repository request.
    pub fn push_page(&self, page: Vec<Repository>) {
        self.lock_pages().push_back(Ok(page));
    }

    pub fn push_page_error(&self, message: &str) {
        self.lock_pages().push_back(Err(LensError::Status {
            status: 502,
            body: message.to_string(),
        }));
    }

    pub fn fail_next_profile(&self) {
        *self.fail_profile.lock().unwrap() = true;
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn repo_calls(&self) -> usize {
        self.repo_calls.load(Ordering::SeqCst)
    }

    fn lock_pages(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<Vec<Repository>>>> {
        self.pages.lock().unwrap()
    }
}

impl Upstream for FakeUpstream {
    async fn fetch_profile(&self, login: &str) -> Result<ProfileLookup> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if std::mem::take(&mut *self.fail_profile.lock().unwrap()) {
            return Err(LensError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(match self.profiles.get(login) {
            Some(profile) => ProfileLookup::Found(profile.clone()),
            None => ProfileLookup::NotFound,
        })
    }

    async fn fetch_repositories(
        &self,
        _login: &str,
        page: u32,
        _per_page: u32,
    ) -> Result<Vec<Repository>> {
        self.repo_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_pages.lock().unwrap().push(page);
        tokio::task::yield_now().await;
        self.lock_pages().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Install a test subscriber so `RUST_LOG=debug cargo test` shows orchestrator logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
