//! Request-scoped form types.
//!
//! Field names follow the HTML form inputs, hence the camelCase renames.

use serde::{Deserialize, Serialize};

/// Registration form: constructed fresh per request, discarded after the
/// request completes or after conversion to an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub repeat_password: String,
}

/// Search query holder; lives for a single request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchForm {
    pub search_term: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}
