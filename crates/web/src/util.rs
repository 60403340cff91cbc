//! Session and flash cookie plumbing shared by the handlers.

use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::Value;
use userdesk_auth::{AuthError, AuthSession};
use userdesk_database::UserAccount;

use crate::{ApiError, AppState};

pub const SESSION_COOKIE: &str = "userdesk_session";
pub const FLASH_COOKIE: &str = "userdesk_flash";

/// Resolve the authenticated principal from the session cookie.
///
/// A missing, unknown, expired, or malformed session resolves to `None`;
/// only infrastructure failures surface as errors. Routes that require a
/// principal redirect to /login when this returns `None`.
pub async fn current_user(
    state: &AppState,
    jar: &CookieJar,
) -> Result<Option<(UserAccount, AuthSession)>, ApiError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };

    match state.authenticator().authenticate_token(cookie.value()).await {
        Ok(pair) => Ok(Some(pair)),
        Err(
            AuthError::InvalidCredentials
            | AuthError::SessionNotFound
            | AuthError::SessionExpired
            | AuthError::InvalidSession,
        ) => Ok(None),
        Err(error) => Err(ApiError::from(error)),
    }
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

pub fn remove_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Redirect while attaching flash data for the next request.
pub async fn flash_redirect(
    state: &AppState,
    jar: CookieJar,
    location: &str,
    value: Value,
) -> (CookieJar, Redirect) {
    let key = state.flash().issue(value).await;
    let cookie = Cookie::build((FLASH_COOKIE, key)).path("/").http_only(true);

    (jar.add(cookie), Redirect::to(location))
}

/// Consume the flash data referenced by the request, if any.
///
/// The server-side entry and the cookie are both cleared, so the data is
/// visible to this request only.
pub async fn take_flash(state: &AppState, jar: CookieJar) -> (CookieJar, Option<Value>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let value = state.flash().consume(cookie.value()).await;
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));

    (jar, value)
}

/// Pull a named string field out of a flash value.
pub fn flash_str(value: &Option<Value>, field: &str) -> Option<String> {
    value
        .as_ref()
        .and_then(|v| v.get(field))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
