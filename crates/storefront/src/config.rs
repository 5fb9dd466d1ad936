use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "storefront.db")
    pub sqlite_path: String,
    /// Prefix the versioned API is mounted under (default: "/api/v1")
    pub api_v1_prefix: String,
    /// Redis connection URL for the session store (default: "redis://localhost:6379")
    #[cfg(feature = "auth-redis")]
    pub redis_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "storefront.db")
    /// - `API_V1_PREFIX` - API prefix (default: "/api/v1")
    /// - `REDIS_URL` - Redis connection URL, `auth-redis` only (default: "redis://localhost:6379")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "storefront.db".to_string()),
            api_v1_prefix: normalize_prefix(
                &lookup("API_V1_PREFIX").unwrap_or_else(|| "/api/v1".to_string()),
            ),
            #[cfg(feature = "auth-redis")]
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
        }
    }
}

/// Ensures a leading slash and no trailing slash, as `Router::nest` expects.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/api/v1".to_string()
    } else {
        format!("/{trimmed}")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
