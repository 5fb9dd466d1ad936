//! HTTP handlers for the demo auth routes.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Serialize;
use storefront_core::auth::SessionData;

use crate::error::AuthError;
use crate::extractors::{BasicAuth, BasicUser, CookieSession, TokenUser};
use crate::AuthState;

#[derive(Debug, Serialize)]
struct BasicEcho {
    message: &'static str,
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct Greeting {
    message: String,
    username: String,
}

impl Greeting {
    fn hello(username: String) -> Self {
        Self {
            message: format!("Hello, {username}!"),
            username,
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginResult {
    result: &'static str,
}

#[derive(Debug, Serialize)]
struct SessionGreeting {
    message: String,
    #[serde(flatten)]
    session: SessionData,
}

/// Creates the demo auth router.
///
/// Routes:
/// - `GET /demo-auth/basic-auth/` - Echo Basic credentials
/// - `GET /demo-auth/basic-auth-username/` - Greet a user checked against the Basic table
/// - `GET /demo-auth/some-http-header-auth/` - Greet a user resolved from the token header
/// - `POST /demo-auth/login-cookie/` - Start a cookie session (requires a valid token)
/// - `GET /demo-auth/check-cookie/` - Show the current session
/// - `GET /demo-auth/logout-cookie/` - End the current session
pub fn demo_auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/demo-auth/basic-auth/", get(basic_auth))
        .route("/demo-auth/basic-auth-username/", get(basic_auth_username))
        .route("/demo-auth/some-http-header-auth/", get(header_auth))
        .route("/demo-auth/login-cookie/", post(login_cookie))
        .route("/demo-auth/check-cookie/", get(check_cookie))
        .route("/demo-auth/logout-cookie/", get(logout_cookie))
}

async fn basic_auth(BasicAuth(credentials): BasicAuth) -> Json<BasicEcho> {
    Json(BasicEcho {
        message: "Hello!",
        username: credentials.username,
        password: credentials.password,
    })
}

async fn basic_auth_username(BasicUser(username): BasicUser) -> Json<Greeting> {
    Json(Greeting::hello(username))
}

async fn header_auth(TokenUser(username): TokenUser) -> Json<Greeting> {
    Json(Greeting::hello(username))
}

async fn login_cookie(
    State(state): State<AuthState>,
    TokenUser(username): TokenUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LoginResult>), AuthError> {
    let data = SessionData::new(username, Utc::now().timestamp());
    let session_id = state.sessions.create(&data).await?;
    tracing::info!(username = %data.username, "Cookie session created");

    let cookie = Cookie::build((state.config.cookie_name.clone(), session_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Json(LoginResult { result: "ok" })))
}

async fn check_cookie(session: CookieSession) -> Json<SessionGreeting> {
    Json(SessionGreeting {
        message: format!("Hello, {}!", session.data.username),
        session: session.data,
    })
}

async fn logout_cookie(
    State(state): State<AuthState>,
    session: CookieSession,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SessionGreeting>), AuthError> {
    state.sessions.delete(&session.id).await?;
    tracing::info!(username = %session.data.username, "Cookie session ended");

    let jar = jar.remove(Cookie::build(state.config.cookie_name.clone()).path("/"));
    Ok((
        jar,
        Json(SessionGreeting {
            message: format!("Bye, {}!", session.data.username),
            session: session.data,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{
            header::{AUTHORIZATION, COOKIE, SET_COOKIE, WWW_AUTHENTICATE},
            Method, Request, StatusCode,
        },
    };
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::{AuthConfig, InMemorySessionStore};

    const ADMIN_TOKEN: &str = "f89e14d25f30b24a70ad4c0cb745";

    fn app() -> Router {
        let state = AuthState::new(Arc::new(InMemorySessionStore::new()), AuthConfig::default());
        demo_auth_routes().with_state(state)
    }

    fn basic(user: &str, pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn get(
        app: &Router,
        uri: &str,
        header: Option<(&str, String)>,
    ) -> axum::response::Response {
        let mut request = Request::builder().uri(uri);
        if let Some((name, value)) = header {
            request = request.header(name, value);
        }
        app.clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_basic_auth_echoes_credentials() {
        let app = app();
        let response = get(
            &app,
            "/demo-auth/basic-auth/",
            Some((AUTHORIZATION.as_str(), basic("anyone", "anything"))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Hello!");
        assert_eq!(json["username"], "anyone");
        assert_eq!(json["password"], "anything");
    }

    #[tokio::test]
    async fn test_basic_auth_without_header_challenges() {
        let response = get(&app(), "/demo-auth/basic-auth/", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[WWW_AUTHENTICATE], "Basic");
    }

    #[tokio::test]
    async fn test_basic_auth_username_accepts_admin() {
        let response = get(
            &app(),
            "/demo-auth/basic-auth-username/",
            Some((AUTHORIZATION.as_str(), basic("admin", "admin"))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Hello, admin!");
        assert_eq!(json["username"], "admin");
    }

    #[tokio::test]
    async fn test_basic_auth_username_rejects_wrong_password() {
        let response = get(
            &app(),
            "/demo-auth/basic-auth-username/",
            Some((AUTHORIZATION.as_str(), basic("admin", "wrong"))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[WWW_AUTHENTICATE], "Basic");
        let json = body_json(response).await;
        assert_eq!(json["detail"], "Invalid username or password");
    }

    #[tokio::test]
    async fn test_header_auth_resolves_token() {
        let app = app();
        let response = get(
            &app,
            "/demo-auth/some-http-header-auth/",
            Some(("x-auth-token", "e12c3dd98209eeed32f5eeb47151145fe160".to_string())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["username"], "eggs");

        let response = get(
            &app,
            "/demo-auth/some-http-header-auth/",
            Some(("x-auth-token", "bogus".to_string())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["detail"], "Token invalid");
    }

    #[tokio::test]
    async fn test_cookie_session_flow() {
        let app = app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/demo-auth/login-cookie/")
                    .header("x-auth-token", ADMIN_TOKEN)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
        assert!(set_cookie.starts_with("web-app-session-id="));
        let cookie = set_cookie.split(';').next().unwrap().to_string();
        assert_eq!(body_json(response).await["result"], "ok");

        let response = get(
            &app,
            "/demo-auth/check-cookie/",
            Some((COOKIE.as_str(), cookie.clone())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Hello, admin!");
        assert_eq!(json["username"], "admin");
        assert!(json["login_at"].as_i64().unwrap() > 0);

        let response = get(
            &app,
            "/demo-auth/logout-cookie/",
            Some((COOKIE.as_str(), cookie.clone())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Bye, admin!");

        let response = get(&app, "/demo-auth/check-cookie/", Some((COOKIE.as_str(), cookie))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["detail"], "Not authenticated");
    }

    #[tokio::test]
    async fn test_login_cookie_requires_valid_token() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/demo-auth/login-cookie/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(SET_COOKIE).is_none());
    }
}
