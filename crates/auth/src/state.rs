//! Shared state for auth handlers.

use std::sync::Arc;

use axum::extract::FromRef;
use storefront_core::auth::SessionRepository;

use crate::config::AuthConfig;

/// Shared state for auth handlers.
#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<dyn SessionRepository>,
    pub config: Arc<AuthConfig>,
}

impl AuthState {
    pub fn new(sessions: Arc<dyn SessionRepository>, config: AuthConfig) -> Self {
        Self {
            sessions,
            config: Arc::new(config),
        }
    }
}

/// Allows AuthState to be extracted from a parent state.
impl<S> FromRef<S> for AuthState
where
    S: AsRef<AuthState>,
{
    fn from_ref(state: &S) -> Self {
        state.as_ref().clone()
    }
}
