//! Session cookies carrying the access and refresh tokens.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

use accounthub_auth::TokenPair;

/// Cookie holding the access token.
pub const ACCESS_COOKIE_NAME: &str = "accessToken";
/// Cookie holding the refresh token.
pub const REFRESH_COOKIE_NAME: &str = "referenceToken";

fn session_cookie(
    name: &'static str,
    value: String,
    secure: bool,
    max_age: Duration,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}

/// Time left until `expires_at` (unix seconds), never negative.
fn lifetime(expires_at: i64) -> Duration {
    Duration::seconds((expires_at - OffsetDateTime::now_utc().unix_timestamp()).max(0))
}

/// Adds both token cookies to the jar. Each cookie lives as long as its token.
pub fn set_session_cookies(jar: CookieJar, tokens: &TokenPair, secure: bool) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_COOKIE_NAME,
        tokens.access_token.clone(),
        secure,
        lifetime(tokens.access_expires_at.timestamp()),
    ))
    .add(session_cookie(
        REFRESH_COOKIE_NAME,
        tokens.refresh_token.clone(),
        secure,
        lifetime(tokens.refresh_expires_at.timestamp()),
    ))
}

/// Expires both token cookies.
///
/// Removal cookies are always emitted, so a client that authenticated with a
/// bearer header still has any stale cookies cleared.
pub fn clear_session_cookies(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(removal_cookie(ACCESS_COOKIE_NAME, secure))
        .add(removal_cookie(REFRESH_COOKIE_NAME, secure))
}

fn removal_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = session_cookie(name, String::new(), secure, Duration::ZERO);
    cookie.make_removal();
    cookie
}

/// Value of a cookie in the jar, if present and non-empty.
pub fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
