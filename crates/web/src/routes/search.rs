//! User search: the form page and the search action.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use userdesk_accounts::{validate_search_term, SearchForm};

use crate::util::{flash_redirect, flash_str, take_flash};
use crate::{views, ApiError, AppState};

pub async fn search_form(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, flash) = take_flash(&state, jar).await;
    let error = flash_str(&flash, "error");

    (jar, views::search_form(error.as_deref())).into_response()
}

/// Blank terms bounce back to the form with a flash error; everything else
/// resolves to a result page, whether or not an account matched.
pub async fn search_action(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SearchForm>,
) -> Result<Response, ApiError> {
    if let Err(error) = validate_search_term(&form.search_term) {
        let (jar, redirect) =
            flash_redirect(&state, jar, "/usersearch", json!({ "error": error.to_string() }))
                .await;
        return Ok((jar, redirect).into_response());
    }

    let result = state
        .accounts()
        .get_user_by_username_ignore_case(&form.search_term)
        .await?;

    Ok(views::search_results(&form.search_term, result.as_ref()).into_response())
}
