//! Static-ish pages: home, login, logout confirmation, and the 403 page.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::util::{current_user, flash_str, take_flash};
use crate::{views, ApiError, AppState};

pub async fn home() -> Response {
    views::home().into_response()
}

pub async fn login(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, flash) = take_flash(&state, jar).await;
    let error = flash_str(&flash, "error");

    (jar, views::login(error.as_deref())).into_response()
}

pub async fn logout_successful() -> Response {
    views::logout_successful().into_response()
}

/// Rendered when the security layer refuses a page. An authenticated
/// principal is named so users understand which account lacks access.
pub async fn access_denied(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, ApiError> {
    let page = match current_user(&state, &jar).await? {
        Some((account, _)) => {
            let message = format!(
                "You are currently logged in as user {}.\nYou do not have permission to access this page!",
                account.username,
            );
            views::access_denied(Some(&account.display_string()), Some(&message))
        }
        None => views::access_denied(None, None),
    };

    Ok(page.into_response())
}
