//! Axum extractors for the demo authentication schemes.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::CookieJar;
use storefront_core::auth::{
    check_basic_credentials, decode_basic_header, lookup_token, AuthError as CoreError,
    BasicCredentials, SessionData, SessionId,
};

use crate::{AuthError, AuthState};

/// Whatever well-formed Basic credentials the client sent, unchecked.
pub struct BasicAuth(pub BasicCredentials);

impl<S> FromRequestParts<S> for BasicAuth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(CoreError::MissingCredentials)?
            .to_str()
            .map_err(|e| CoreError::MalformedCredentials(e.to_string()))?;

        Ok(BasicAuth(decode_basic_header(header)?))
    }
}

/// Username whose Basic credentials match the configured table.
pub struct BasicUser(pub String);

impl<S> FromRequestParts<S> for BasicUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let BasicAuth(credentials) = BasicAuth::from_request_parts(parts, state).await?;

        let username = check_basic_credentials(&auth_state.config.basic_credentials, &credentials)
            .inspect_err(|_| {
                tracing::debug!(username = %credentials.username, "Basic credentials rejected")
            })?;
        Ok(BasicUser(username))
    }
}

/// Username resolved from the static token header.
pub struct TokenUser(pub String);

impl<S> FromRequestParts<S> for TokenUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let token = parts
            .headers
            .get(auth_state.config.token_header.as_str())
            .and_then(|value| value.to_str().ok())
            .ok_or(CoreError::InvalidToken)?;

        Ok(TokenUser(lookup_token(&auth_state.config.static_tokens, token)?))
    }
}

/// The session behind the request's session cookie.
pub struct CookieSession {
    pub id: SessionId,
    pub data: SessionData,
}

impl<S> FromRequestParts<S> for CookieSession
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar
            .get(&auth_state.config.cookie_name)
            .ok_or(CoreError::NotAuthenticated)?;
        let id = SessionId::new(cookie.value().to_string());

        let data = auth_state
            .sessions
            .get(&id)
            .await?
            .ok_or(CoreError::NotAuthenticated)?;

        Ok(CookieSession { id, data })
    }
}
