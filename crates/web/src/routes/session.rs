//! Login and logout actions. The login *page* lives in `pages`.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use userdesk_accounts::LoginForm;
use userdesk_auth::AuthError;

use crate::util::{flash_redirect, remove_session_cookie, session_cookie, SESSION_COOKIE};
use crate::{ApiError, AppState};

pub async fn login_action(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    match state
        .authenticator()
        .login(&form.username, &form.password)
        .await
    {
        Ok(session) => {
            let jar = jar.add(session_cookie(session.token));
            Ok((jar, Redirect::to("/userInfo")).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            let (jar, redirect) = flash_redirect(
                &state,
                jar,
                "/login",
                json!({ "error": "Invalid username or password" }),
            )
            .await;
            Ok((jar, redirect).into_response())
        }
        Err(error) => Err(ApiError::from(error)),
    }
}

pub async fn logout_action(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, ApiError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.authenticator().logout(cookie.value()).await?;
    }

    let jar = remove_session_cookie(jar);

    Ok((jar, Redirect::to("/logoutSuccessful")).into_response())
}
