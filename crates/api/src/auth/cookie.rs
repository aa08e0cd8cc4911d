//! Session cookie formatting and parsing.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use bazaar_core::session::SESSION_COOKIE_NAME;
use cookie::time::Duration;
use cookie::{Cookie, SameSite};

fn base(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .build()
}

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(token: &str, lifetime: chrono::Duration) -> String {
    let mut cookie = base(token.to_string());
    cookie.set_max_age(Duration::seconds(lifetime.num_seconds()));
    cookie.to_string()
}

/// `Set-Cookie` value that makes the client drop its session cookie.
pub fn cleared_session_cookie() -> String {
    let mut cookie = base(String::new());
    cookie.make_removal();
    cookie.to_string()
}

/// Find the session token among the request's `Cookie` headers.
///
/// Malformed pairs are skipped. Empty values count as absent.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|token| !token.is_empty())
}
