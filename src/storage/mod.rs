//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with one table:
//! - records(id, name, price, qty)
//!
//! Every operation is a single statement; mutations run inside a scoped
//! transaction that commits on success and rolls back when dropped.

pub mod schema;
pub mod sqlite;
pub mod update;

pub use sqlite::{DeleteOutcome, RecordStore, UpdateOutcome};
pub use update::{UpdateBuilder, UpdateStatement};
