// Lookup session state shown to the presentation layer.
// Holds the current profile, accumulated repositories, and pagination cursor.

use crate::github::{Profile, Repository};

use super::cursor::Cursor;
use super::metrics::MetricsSnapshot;
use super::query::QueryKey;

/// Profile side of the current lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileState {
    Found(Profile),
    NotFound,
}

impl ProfileState {
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            ProfileState::Found(profile) => Some(profile),
            ProfileState::NotFound => None,
        }
    }
}

/// Mutable state owned by the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Key of the last successful lookup.
    pub query: Option<QueryKey>,
    pub profile: Option<ProfileState>,
    pub repositories: Vec<Repository>,
    pub cursor: Cursor,
    /// Message from the last failed resolution, cleared on success.
    pub last_error: Option<String>,
}

impl Session {
    /// Profile already loaded for `key`, if any.
    pub fn profile_for(&self, key: &QueryKey) -> Option<&Profile> {
        if self.query.as_ref() != Some(key) {
            return None;
        }
        self.profile.as_ref().and_then(ProfileState::profile)
    }

    /// Replace everything with a fresh first page.
    pub fn show_first_page(
        &mut self,
        key: QueryKey,
        profile: Profile,
        repositories: Vec<Repository>,
        cursor: Cursor,
    ) {
        self.query = Some(key);
        self.profile = Some(ProfileState::Found(profile));
        self.repositories = repositories;
        self.cursor = cursor;
        self.last_error = None;
    }

    /// Append a continuation page. A page for a different key starts over.
    pub fn append_page(
        &mut self,
        key: QueryKey,
        profile: Profile,
        mut repositories: Vec<Repository>,
        cursor: Cursor,
    ) {
        if self.query.as_ref() != Some(&key) {
            self.repositories.clear();
            self.query = Some(key);
        }
        self.profile = Some(ProfileState::Found(profile));
        self.repositories.append(&mut repositories);
        self.cursor = cursor;
        self.last_error = None;
    }

    pub fn show_not_found(&mut self, key: QueryKey) {
        self.query = Some(key);
        self.profile = Some(ProfileState::NotFound);
        self.repositories.clear();
        self.cursor = Cursor::exhausted();
        self.last_error = None;
    }

    pub fn record_error(&mut self, message: String) {
        self.last_error = Some(message);
    }
}

/// Read-only copy of the session plus metrics, for rendering.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub query: Option<QueryKey>,
    pub profile: Option<ProfileState>,
    pub repositories: Vec<Repository>,
    pub cursor: Cursor,
    pub metrics: MetricsSnapshot,
    pub last_error: Option<String>,
}

impl Snapshot {
    pub fn is_not_found(&self) -> bool {
        matches!(self.profile, Some(ProfileState::NotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{profile, repositories};

    #[test]
    fn test_profile_for_matches_key_only() {
        let mut session = Session::default();
        let key = QueryKey::parse("octocat").unwrap();
        session.show_first_page(key.clone(), profile("octocat"), repositories(2), Cursor::default());

        assert!(session.profile_for(&key).is_some());
        assert!(session.profile_for(&QueryKey::parse("other").unwrap()).is_none());
    }

    #[test]
    fn test_not_found_clears_repositories() {
        let mut session = Session::default();
        let key = QueryKey::parse("octocat").unwrap();
        session.show_first_page(key.clone(), profile("octocat"), repositories(2), Cursor::default());

        session.show_not_found(QueryKey::parse("ghost").unwrap());
        assert!(session.repositories.is_empty());
        assert_eq!(session.profile, Some(ProfileState::NotFound));
        assert!(!session.cursor.can_load_more());
        assert!(session.profile_for(&key).is_none());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut session = Session::default();
        let key = QueryKey::parse("octocat").unwrap();
        session.show_first_page(key.clone(), profile("octocat"), repositories(2), Cursor::default());
        session.append_page(
            key,
            profile("octocat"),
            crate::testing::repositories_from(2, 2),
            Cursor::after_page(2, 2, 30),
        );

        let ids: Vec<u64> = session.repositories.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(session.cursor.page, 2);
    }
}
