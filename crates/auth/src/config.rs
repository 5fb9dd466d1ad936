use std::collections::HashMap;

use storefront_core::auth::parse_pairs;

use crate::error::AuthError;

const DEFAULT_USERS: &[(&str, &str)] = &[("admin", "admin"), ("john", "eggs")];

const DEFAULT_TOKENS: &[(&str, &str)] = &[
    ("f89e14d25f30b24a70ad4c0cb745", "admin"),
    ("e12c3dd98209eeed32f5eeb47151145fe160", "eggs"),
];

/// Credential tables and names used by the demo schemes.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Username to password.
    pub basic_credentials: HashMap<String, String>,
    /// Token to username.
    pub static_tokens: HashMap<String, String>,
    pub cookie_name: String,
    pub token_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        let owned = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        Self {
            basic_credentials: owned(DEFAULT_USERS),
            static_tokens: owned(DEFAULT_TOKENS),
            cookie_name: "web-app-session-id".to_string(),
            token_header: "x-auth-token".to_string(),
        }
    }
}

impl AuthConfig {
    /// Load from environment variables, falling back to the demo tables.
    ///
    /// # Environment Variables
    ///
    /// - `DEMO_AUTH_USERS`: `user:pass,user:pass` (default: `admin:admin,john:eggs`)
    /// - `DEMO_AUTH_TOKENS`: `token:user,token:user`
    /// - `SESSION_COOKIE_NAME`: session cookie name (default: `web-app-session-id`)
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Config` if a table variable is malformed.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AuthError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("DEMO_AUTH_USERS") {
            config.basic_credentials =
                parse_pairs(&raw).map_err(|e| AuthError::Config(format!("DEMO_AUTH_USERS: {e}")))?;
        }
        if let Some(raw) = lookup("DEMO_AUTH_TOKENS") {
            config.static_tokens = parse_pairs(&raw)
                .map_err(|e| AuthError::Config(format!("DEMO_AUTH_TOKENS: {e}")))?;
        }
        if let Some(name) = lookup("SESSION_COOKIE_NAME").filter(|n| !n.trim().is_empty()) {
            config.cookie_name = name;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_tables() {
        let config = AuthConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.basic_credentials["admin"], "admin");
        assert_eq!(config.basic_credentials["john"], "eggs");
        assert_eq!(config.static_tokens["f89e14d25f30b24a70ad4c0cb745"], "admin");
        assert_eq!(
            config.static_tokens["e12c3dd98209eeed32f5eeb47151145fe160"],
            "eggs"
        );
        assert_eq!(config.cookie_name, "web-app-session-id");
        assert_eq!(config.token_header, "x-auth-token");
    }

    #[test]
    fn test_env_overrides_tables() {
        let config = AuthConfig::from_lookup(|key| match key {
            "DEMO_AUTH_USERS" => Some("alice:secret".to_string()),
            "SESSION_COOKIE_NAME" => Some("sid".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.basic_credentials.len(), 1);
        assert_eq!(config.basic_credentials["alice"], "secret");
        assert_eq!(config.static_tokens.len(), 2);
        assert_eq!(config.cookie_name, "sid");
    }

    #[test]
    fn test_malformed_table_is_rejected() {
        let result = AuthConfig::from_lookup(|key| {
            (key == "DEMO_AUTH_TOKENS").then(|| "no-separator".to_string())
        });
        assert!(matches!(result, Err(AuthError::Config(_))));
    }
}
