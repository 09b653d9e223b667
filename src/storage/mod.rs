//! Persisted offline snapshot.
//!
//! A small SQLite key-value table consulted only when a live catalog fetch
//! fails. Organized like the rest of the storage layer:
//! - `schema`: connection and table management
//! - `queries`: key-value reads/writes and the catalog snapshot helpers

pub mod queries;
pub mod schema;


pub use queries::{StoredEntry, SNAPSHOT_PLAYER_LIMIT};
pub use schema::SnapshotStore;
