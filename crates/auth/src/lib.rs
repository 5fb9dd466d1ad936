//! Demo authentication for storefront.
//!
//! This crate provides:
//! - HTTP Basic, static header token and cookie session schemes
//! - Session storage (in-memory, SQLite or Redis via feature flags)
//! - Axum extractors and the `/demo-auth` routes

mod config;
mod error;
mod extractors;
mod handlers;
mod sessions;
mod state;

pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{BasicAuth, BasicUser, CookieSession, TokenUser};
pub use handlers::demo_auth_routes;
pub use sessions::InMemorySessionStore;
#[cfg(feature = "redis")]
pub use sessions::RedisSessionStore;
#[cfg(feature = "sqlite")]
pub use sessions::SqliteSessionStore;
pub use state::AuthState;
