//! Authenticated account pages and the JSON listing endpoint.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use userdesk_database::UserAccount;

use crate::util::current_user;
use crate::{views, ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct UserAccountRecord {
    pub id: String,
    pub username: String,
    pub role: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

impl From<UserAccount> for UserAccountRecord {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.public_id,
            username: account.username,
            role: account.role.to_string(),
            created_at: account.created_at,
            last_login_at: account.last_login_at,
        }
    }
}

pub async fn user_info(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, ApiError> {
    let Some((principal, _)) = current_user(&state, &jar).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let account = state
        .accounts()
        .get_user_by_username(&principal.username)
        .await?;

    Ok(views::user_info(&account).into_response())
}

pub async fn admin(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    let Some((principal, _)) = current_user(&state, &jar).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    if !principal.is_admin() {
        return Ok(Redirect::to("/403").into_response());
    }

    let accounts = state.accounts().get_all_users().await?;

    Ok(views::admin(&principal.display_string(), &accounts).into_response())
}

pub async fn list_user_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserAccountRecord>>, ApiError> {
    let accounts = state.accounts().get_all_users().await?;

    Ok(Json(
        accounts.into_iter().map(UserAccountRecord::from).collect(),
    ))
}
