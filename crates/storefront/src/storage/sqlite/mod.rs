//! SQLite storage backend implementation.
//!
//! This module provides a SQLite-based implementation of the repository traits
//! using `rusqlite` for synchronous operations and `tokio-rusqlite` for async wrapping.
//! The schema is versioned; pending migrations run when the repository opens.

mod conversions;
mod error;
mod migrations;
mod repository;
mod schema;

pub use repository::SqliteRepository;
