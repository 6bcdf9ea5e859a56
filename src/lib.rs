//! octolens - cached GitHub profile and repository lookups.
//!
//! The [`Orchestrator`] serves a user's profile and most recently updated
//! repositories from a TTL cache or from the GitHub REST API, pages through
//! the repository listing, and counts requests, cache hits and API calls.

pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod orchestrator;
pub mod state;

#[cfg(test)]
mod testing;

pub use cache::{CacheEntry, CacheStore, FileStore, MemoryStore};
pub use config::{DEFAULT_TTL, LensConfig, PAGE_SIZE};
pub use error::{LensError, Result};
pub use github::{GitHubClient, Profile, ProfileLookup, RateLimit, Repository, Upstream};
pub use orchestrator::{Orchestrator, Resolution};
pub use state::{Cursor, MetricsSnapshot, ProfileState, QueryKey, Snapshot};
