//! Session storage implementations.
//!
//! Provides `SessionRepository` implementations for:
//! - In-memory (always available)
//! - SQLite (with `sqlite` feature)
//! - Redis (with `redis` feature)

mod inmemory;
#[cfg(feature = "redis")]
mod redis_impl;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use inmemory::SessionStore as InMemorySessionStore;
#[cfg(feature = "redis")]
pub use redis_impl::SessionStore as RedisSessionStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SessionStore as SqliteSessionStore;
