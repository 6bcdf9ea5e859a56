// Query key normalization.

use std::fmt;

const MAX_LOGIN_LEN: usize = 39;

/// Normalized user identifier. Addresses one cache entry and one pagination session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    /// Trim and lowercase the input (GitHub logins are case-insensitive).
    /// Returns `None` for blank input or anything that is not a valid login:
    /// ASCII alphanumerics and `-`, at most 39 characters. The key is placed
    /// in request paths verbatim.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > MAX_LOGIN_LEN {
            return None;
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return None;
        }
        Some(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
