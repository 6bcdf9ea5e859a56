// Cache path utilities.
// Maps query keys to JSON files under the cache directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/octolens on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "octolens").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding one file per cached lookup.
pub fn lookups_dir(base: &Path) -> PathBuf {
    base.join("lookups")
}

/// Path to the cached lookup for a query key.
pub fn entry_path(base: &Path, key: &str) -> PathBuf {
    lookups_dir(base).join(format!("{}.json", sanitize_name(key)))
}

/// Sanitize a name for use as a filesystem path component.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => '_',
            _ => c,
        })
        .collect()
}
