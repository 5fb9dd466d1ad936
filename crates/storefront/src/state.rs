//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds repository trait objects for the catalog,
//! orders and accounts, plus the demo auth state. Backends are chosen via
//! feature flags.

use std::sync::Arc;

use storefront_auth::{AuthConfig, AuthState};
use storefront_core::auth::SessionRepository;
use storefront_core::storage::{OrderRepository, ProductRepository, UserRepository};

use crate::config::Config;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Session store features: at most one, in-memory when neither is set
#[cfg(all(feature = "auth-sqlite", feature = "auth-redis"))]
compile_error!("Cannot enable both 'auth-sqlite' and 'auth-redis' session store features");

/// Shared application state.
///
/// This is cloned for each request handler and contains shared resources
/// including repository trait objects for database access.
#[derive(Clone)]
pub struct AppState {
    /// Product catalog.
    pub products: Arc<dyn ProductRepository>,
    /// Orders and their lines.
    pub orders: Arc<dyn OrderRepository>,
    /// Users, profiles and posts. Only the demo scenarios write here.
    pub users: Arc<dyn UserRepository>,
    /// Session store and credential tables for `/demo-auth`.
    pub auth: AuthState,
    /// Where the versioned API is mounted.
    pub api_prefix: String,
}

impl AppState {
    /// Creates a new AppState from one repository serving every trait.
    fn build<R>(repo: Arc<R>, auth: AuthState, config: &Config) -> Self
    where
        R: ProductRepository + OrderRepository + UserRepository + 'static,
    {
        Self {
            products: repo.clone(),
            orders: repo.clone(),
            users: repo,
            auth,
            api_prefix: config.api_v1_prefix.clone(),
        }
    }
}

impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}

// ============================================================================
// Session store selection
// ============================================================================

#[cfg(not(any(feature = "auth-sqlite", feature = "auth-redis")))]
async fn session_store(_config: &Config) -> Result<Arc<dyn SessionRepository>, anyhow::Error> {
    Ok(Arc::new(storefront_auth::InMemorySessionStore::new()))
}

#[cfg(feature = "auth-sqlite")]
async fn session_store(config: &Config) -> Result<Arc<dyn SessionRepository>, anyhow::Error> {
    use sqlx::sqlite::SqlitePoolOptions;

    let pool = SqlitePoolOptions::new()
        .connect(&format!("sqlite://{}?mode=rwc", config.sqlite_path))
        .await?;
    let store = storefront_auth::SqliteSessionStore::new(pool);
    store.migrate().await?;

    tracing::info!(path = %config.sqlite_path, "Using SQLite session store");
    Ok(Arc::new(store))
}

#[cfg(feature = "auth-redis")]
async fn session_store(config: &Config) -> Result<Arc<dyn SessionRepository>, anyhow::Error> {
    use fred::prelude::*;

    let redis_config = fred::prelude::Config::from_url(&config.redis_url)?;
    let pool = Builder::from_config(redis_config).build_pool(4)?;
    pool.init().await?;

    tracing::info!(url = %config.redis_url, "Using Redis session store");
    Ok(Arc::new(storefront_auth::RedisSessionStore::new(pool)))
}

// ============================================================================
// Factory functions for different storage backends
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite_storage {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config, auth_config: AuthConfig) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let auth = AuthState::new(session_store(config).await?, auth_config);

            tracing::info!(path = %config.sqlite_path, "Opened SQLite storage");
            Ok(Self::build(repo, auth, config))
        }
    }
}

#[cfg(feature = "inmemory")]
mod inmemory_storage {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        pub async fn new(config: &Config, auth_config: AuthConfig) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(InMemoryRepository::new());
            let auth = AuthState::new(session_store(config).await?, auth_config);

            tracing::warn!("Using in-memory storage, data is lost on exit");
            Ok(Self::build(repo, auth, config))
        }
    }
}

#[cfg(test)]
mod test_support {
    use super::*;
    use crate::storage::InMemoryRepository;
    use storefront_auth::InMemorySessionStore;

    impl Default for AppState {
        /// Creates an AppState with in-memory storage for testing.
        ///
        /// This is only available in test builds and provides a simple way
        /// to create an AppState without external dependencies.
        fn default() -> Self {
            let config = Config::default();
            let auth = AuthState::new(
                Arc::new(InMemorySessionStore::new()),
                AuthConfig::default(),
            );
            Self::build(Arc::new(InMemoryRepository::new()), auth, &config)
        }
    }
}
