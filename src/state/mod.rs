// State management module.
// Query keys, pagination cursor, request metrics, and the lookup session.

pub mod cursor;
pub mod metrics;
pub mod query;
pub mod session;

pub use cursor::Cursor;
pub use metrics::{Metrics, MetricsSnapshot};
pub use query::QueryKey;
pub use session::{ProfileState, Session, Snapshot};
