// GitHub API module.
// Provides the HTTP client, the upstream trait, and response types.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use endpoints::Upstream;
pub use types::*;
