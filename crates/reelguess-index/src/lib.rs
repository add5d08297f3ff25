// SQLite guess-state store
// One shadow record per (kind, id); genre lists and credits are cached beside it

mod db;
mod error;
mod queries;
mod records;
mod schema;

// Public API
pub use db::Database;
pub use error::{Error, Result};
pub use records::{CachedGenres, KindStats, ShadowRecord, StoreStats};
pub use schema::SCHEMA_VERSION;
