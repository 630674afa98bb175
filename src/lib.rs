//! # Stockroom - Product catalog over an embedded store
//!
//! Stockroom keeps a single catalog of products (name, price, quantity) in a
//! SQLite file and exposes create/read/update/delete through an interactive
//! menu and one-shot subcommands.
//!
//! Stockroom provides:
//! - A `records` table with idempotent schema setup
//! - Single-statement store operations, including partial updates
//! - A command loop that validates operator input and survives failures
//! - TOML configuration and styled terminal output

pub mod record;
pub mod storage;
pub mod shell;
pub mod ui;
pub mod config;
pub mod commands;

// Re-exports for convenient access
pub use record::{Record, RecordPatch};
pub use storage::{DeleteOutcome, RecordStore, UpdateOutcome};
pub use shell::Shell;

/// Result type alias for Stockroom operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Stockroom operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input error: {0}")]
    Readline(String),
}
