// Cache module for lookup results.
// Stores profile + first repository page per query key, with TTL checks.

pub mod entry;
pub mod paths;
pub mod store;

pub use entry::CacheEntry;
pub use store::{CacheStore, FileStore, MemoryStore};
