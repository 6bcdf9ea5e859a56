// GitHub API response types.
// Defines structs for deserializing user profiles and repository listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LensError, Result};

/// GitHub user profile from `/users/{login}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    #[serde(default)]
    pub id: u64,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    pub location: Option<String>,
    pub html_url: Option<String>,
}

impl Profile {
    /// Name to show, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

/// Outcome of a profile lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLookup {
    Found(Profile),
    NotFound,
}

/// Error body GitHub returns for missing users (`{"message": "Not Found"}`).
#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    pub message: String,
}

/// Profile endpoint payload: either a profile or a message body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProfileBody {
    Profile(Profile),
    Message(MessageBody),
}

impl ProfileBody {
    pub(crate) fn into_lookup(self) -> Result<ProfileLookup> {
        match self {
            ProfileBody::Profile(profile) => Ok(ProfileLookup::Found(profile)),
            ProfileBody::Message(body) if body.message.eq_ignore_ascii_case("not found") => {
                Ok(ProfileLookup::NotFound)
            }
            ProfileBody::Message(body) => Err(LensError::Status {
                status: 200,
                body: body.message,
            }),
        }
    }
}

/// GitHub repository as listed under `/users/{login}/repos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_ignores_unknown_fields() {
        let json = r#"{
            "login": "octocat",
            "id": 583231,
            "name": null,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "bio": null,
            "followers": 100,
            "following": 9,
            "public_repos": 8,
            "location": "San Francisco",
            "html_url": "https://github.com/octocat",
            "site_admin": false
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.followers, 100);
        assert_eq!(profile.display_name(), "octocat");
    }

    #[test]
    fn test_not_found_message_body_maps_to_not_found() {
        let body: ProfileBody = serde_json::from_str(
            r#"{"message": "Not Found", "documentation_url": "https://docs.github.com/rest"}"#,
        )
        .unwrap();
        assert_eq!(body.into_lookup().unwrap(), ProfileLookup::NotFound);
    }

    #[test]
    fn test_profile_body_prefers_profile() {
        let body: ProfileBody =
            serde_json::from_str(r#"{"login": "octocat", "id": 1, "followers": 3}"#).unwrap();
        match body.into_lookup().unwrap() {
            ProfileLookup::Found(profile) => assert_eq!(profile.login, "octocat"),
            ProfileLookup::NotFound => panic!("expected a profile"),
        }
    }

    #[test]
    fn test_other_message_body_is_an_error() {
        let body: ProfileBody =
            serde_json::from_str(r#"{"message": "Server Error"}"#).unwrap();
        assert!(matches!(
            body.into_lookup(),
            Err(LensError::Status { status: 200, .. })
        ));
    }

    #[test]
    fn test_repository_minimal_fields() {
        let json = r#"{
            "id": 1296269,
            "name": "Hello-World",
            "html_url": "https://github.com/octocat/Hello-World",
            "description": null,
            "stargazers_count": 80,
            "forks_count": 9,
            "updated_at": "2011-01-26T19:14:43Z"
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "Hello-World");
        assert_eq!(repo.stargazers_count, 80);
        assert!(repo.description.is_none());
        assert!(repo.updated_at.is_some());
    }
}
