// Upstream endpoints for profile and repository lookups.
// The orchestrator talks to `Upstream`; `GitHubClient` is the real implementation.

use std::future::Future;

use crate::error::{LensError, Result};

use super::client::GitHubClient;
use super::types::{ProfileBody, ProfileLookup, Repository};

/// Source of profile and repository data.
pub trait Upstream {
    /// Fetch a user profile. A missing user is `ProfileLookup::NotFound`, not an error.
    fn fetch_profile(&self, login: &str) -> impl Future<Output = Result<ProfileLookup>> + Send;

    /// Fetch one page of a user's repositories, most recently updated first.
    fn fetch_repositories(
        &self,
        login: &str,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<Repository>>> + Send;
}

impl Upstream for GitHubClient {
    async fn fetch_profile(&self, login: &str) -> Result<ProfileLookup> {
        match self.get(&format!("/users/{}", login)).await {
            Ok(response) => {
                let body: ProfileBody = response.json().await?;
                body.into_lookup()
            }
            Err(LensError::NotFound(_)) => Ok(ProfileLookup::NotFound),
            Err(e) => Err(e),
        }
    }

    async fn fetch_repositories(
        &self,
        login: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>> {
        let params = [
            ("sort", "updated"),
            ("direction", "desc"),
            ("page", &page.to_string()),
            ("per_page", &per_page.to_string()),
        ];
        let response = self
            .get_with_params(&format!("/users/{}/repos", login), &params)
            .await?;
        let repos: Vec<Repository> = response.json().await?;
        Ok(repos)
    }
}
