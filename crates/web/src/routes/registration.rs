//! Registration: form page, submission, and the success page.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use userdesk_accounts::{validate_registration, RegistrationForm};
use userdesk_auth::password;

use crate::util::{flash_str, take_flash, FLASH_COOKIE};
use crate::{views, ApiError, AppState};

const GENERATED_PASSWORD_LENGTH: usize = 12;

/// The empty form is pre-filled with two independently generated passwords,
/// one per field, for the user to keep or replace.
pub async fn registration_form() -> Response {
    let form = RegistrationForm {
        username: String::new(),
        password: password::generate_password(GENERATED_PASSWORD_LENGTH),
        repeat_password: password::generate_password(GENERATED_PASSWORD_LENGTH),
    };

    views::registration(&form, &[], None).into_response()
}

/// Field validation failures and business failures both re-render the form;
/// only a successful creation redirects.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, ApiError> {
    let errors = validate_registration(&form);
    if !errors.is_empty() {
        return Ok(views::registration(&form, &errors, None).into_response());
    }

    let new_account = match state.accounts().create_user(&form).await {
        Ok(account) => account,
        Err(error) => {
            let message = format!("Error: {error}");
            return Ok(views::registration(&form, &[], Some(&message)).into_response());
        }
    };

    // The account goes into the flash store before it is persisted, so the
    // success page can greet the user the redirect was issued for.
    let flash_value = serde_json::to_value(&new_account)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;
    let flash_key = state.flash().issue(flash_value).await;

    state.accounts().save_user(new_account).await?;

    let jar = jar.add(Cookie::build((FLASH_COOKIE, flash_key)).path("/").http_only(true));

    Ok((jar, Redirect::to("/registrationSuccessful")).into_response())
}

pub async fn registration_successful(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Response {
    let (jar, flash) = take_flash(&state, jar).await;
    let username = flash_str(&flash, "username");

    (jar, views::registration_successful(username.as_deref())).into_response()
}
