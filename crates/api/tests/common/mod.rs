//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use bazaar_api::auth::password::hash_password;
use bazaar_api::config::{LogFormat, ServerConfig};
use bazaar_api::labels::{LabelRenderer, TextLabelRenderer};
use bazaar_api::router::build_app_router;
use bazaar_api::state::AppState;
use bazaar_core::item::NewItem;
use bazaar_core::roles::Role;
use bazaar_core::session::{generate_session_token, SESSION_COOKIE_NAME};
use bazaar_core::types::{DbId, MoneyInCents, Timestamp};
use bazaar_db::models::session::CreateSession;
use bazaar_db::models::user::CreateUser;
use bazaar_db::repositories::{ItemRepo, SessionRepo, UserRepo};
use bazaar_db::DbPool;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Password shared by every user created through [`create_user`].
pub const TEST_PASSWORD: &str = "flea-market-2024";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_lifetime_hours: 12,
        admin_password: None,
        log_format: LogFormat::Plain,
    }
}

/// Fresh in-memory database with the schema applied.
pub async fn test_pool() -> DbPool {
    let pool = bazaar_db::create_in_memory_pool()
        .await
        .expect("in-memory pool");
    bazaar_db::run_migrations(&pool).await.expect("migrations");
    pool
}

/// Build the full application router over `pool`, exactly as `main.rs` does.
pub fn build_test_app(pool: DbPool) -> Router {
    build_test_app_with_renderer(pool, Arc::new(TextLabelRenderer))
}

pub fn build_test_app_with_renderer(pool: DbPool, renderer: Arc<dyn LabelRenderer>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        label_renderer: renderer,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Argon2 is slow in debug builds, so every fixture user shares one hash.
fn test_password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(TEST_PASSWORD).expect("hashing should succeed"))
        .clone()
}

pub async fn create_user(pool: &DbPool, role: Role) -> DbId {
    let input = CreateUser {
        role,
        password_hash: test_password_hash(),
        created_at: Utc::now(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

/// Open a session directly in the store, skipping the login round-trip.
pub async fn open_session(pool: &DbPool, user_id: DbId) -> String {
    open_session_until(pool, user_id, Utc::now() + Duration::hours(1)).await
}

pub async fn open_session_until(pool: &DbPool, user_id: DbId, expires_at: Timestamp) -> String {
    let token = generate_session_token();
    let input = CreateSession {
        token_hash: token.hash,
        user_id,
        created_at: Utc::now() - Duration::hours(2),
        expires_at,
    };
    SessionRepo::create(pool, &input)
        .await
        .expect("session creation should succeed");
    token.plaintext
}

/// A user of `role` with a live session.
pub async fn login_as(pool: &DbPool, role: Role) -> (DbId, String) {
    let id = create_user(pool, role).await;
    let token = open_session(pool, id).await;
    (id, token)
}

pub async fn add_item(pool: &DbPool, seller_id: DbId, price_in_cents: MoneyInCents) -> DbId {
    let input = NewItem {
        description: "Picture book".to_string(),
        price_in_cents,
        category_id: 8,
        donation: false,
        charity: false,
    };
    ItemRepo::add(pool, Utc::now(), seller_id, &input)
        .await
        .expect("item creation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("{SESSION_COOKIE_NAME}={token}"));
    }
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), None)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// The `Set-Cookie` header of a response, if any.
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

/// Session token carried by a login response's `Set-Cookie` header.
pub fn session_token(response: &Response<Body>) -> String {
    let cookie = set_cookie(response).expect("login must set a cookie");
    let pair = cookie.split(';').next().unwrap();
    let (name, token) = pair.split_once('=').unwrap();
    assert_eq!(name, SESSION_COOKIE_NAME);
    token.to_string()
}

/// Assert an error response's status and `type`.
pub async fn assert_error(response: Response<Body>, status: StatusCode, kind: &str) {
    assert_eq!(response.status(), status, "unexpected status for {kind}");
    let json = body_json(response).await;
    assert_eq!(json["type"], kind, "body: {json}");
    assert!(json["details"].is_string());
}
