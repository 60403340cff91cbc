//! Form validation.
//!
//! Each form has a dedicated validation function invoked directly by its
//! handler. Errors carry the offending field name and render as
//! `"field: message"`, which is also the format used for flash messages.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::forms::RegistrationForm;

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("username regex is valid"));

/// A validation failure scoped to a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a registration submission. Returns every failure, not just the
/// first, so the form can annotate all offending fields at once.
pub fn validate_registration(form: &RegistrationForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(error) = validate_username(&form.username) {
        errors.push(error);
    }

    if let Some(error) = validate_password(&form.password) {
        errors.push(error);
    }

    if form.repeat_password != form.password {
        errors.push(FieldError::new(
            "repeatPassword",
            "does not match the password",
        ));
    }

    errors
}

/// The search term must not be blank.
pub fn validate_search_term(term: &str) -> Result<(), FieldError> {
    if term.trim().is_empty() {
        return Err(FieldError::new("searchTerm", "must not be blank"));
    }

    Ok(())
}

fn validate_username(username: &str) -> Option<FieldError> {
    if username.len() < 3 {
        return Some(FieldError::new(
            "username",
            "must be at least 3 characters long",
        ));
    }

    if username.len() > 30 {
        return Some(FieldError::new(
            "username",
            "must be less than 30 characters long",
        ));
    }

    if !USERNAME_REGEX.is_match(username) {
        return Some(FieldError::new(
            "username",
            "can only contain letters, numbers, underscores, and hyphens",
        ));
    }

    None
}

fn validate_password(password: &str) -> Option<FieldError> {
    if password.len() < 8 {
        return Some(FieldError::new(
            "password",
            "must be at least 8 characters long",
        ));
    }

    if password.len() > 128 {
        return Some(FieldError::new(
            "password",
            "must be less than 128 characters long",
        ));
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Some(FieldError::new(
            "password",
            "must contain at least one lowercase letter",
        ));
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Some(FieldError::new(
            "password",
            "must contain at least one uppercase letter",
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some(FieldError::new(
            "password",
            "must contain at least one digit",
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            username: "alice".to_string(),
            password: "Password123".to_string(),
            repeat_password: "Password123".to_string(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(validate_registration(&valid_form()).is_empty());
    }

    #[test]
    fn username_rules() {
        let mut form = valid_form();
        form.username = "ab".to_string();
        assert_eq!(validate_registration(&form)[0].field, "username");

        form.username = "a".repeat(31);
        assert_eq!(validate_registration(&form)[0].field, "username");

        form.username = "user@name".to_string();
        assert_eq!(validate_registration(&form)[0].field, "username");

        form.username = "user_123-ok".to_string();
        assert!(validate_registration(&form).is_empty());
    }

    #[test]
    fn password_rules() {
        let mut form = valid_form();

        for bad in ["Sh0rt", "nouppercase123", "NOLOWERCASE123", "NoDigitsHere"] {
            form.password = bad.to_string();
            form.repeat_password = bad.to_string();
            let errors = validate_registration(&form);
            assert_eq!(errors.len(), 1, "expected one error for {bad:?}");
            assert_eq!(errors[0].field, "password");
        }

        form.password = "a".repeat(129);
        form.repeat_password = form.password.clone();
        assert_eq!(validate_registration(&form)[0].field, "password");
    }

    #[test]
    fn mismatched_repeat_password_is_reported() {
        let mut form = valid_form();
        form.repeat_password = "Password124".to_string();

        let errors = validate_registration(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "repeatPassword");
        assert_eq!(errors[0].to_string(), "repeatPassword: does not match the password");
    }

    #[test]
    fn multiple_failures_are_all_reported() {
        let form = RegistrationForm {
            username: "a".to_string(),
            password: "weak".to_string(),
            repeat_password: "different".to_string(),
        };

        let fields: Vec<&str> = validate_registration(&form)
            .iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["username", "password", "repeatPassword"]);
    }

    #[test]
    fn search_term_must_not_be_blank() {
        assert!(validate_search_term("alice").is_ok());

        let error = validate_search_term("   ").unwrap_err();
        assert_eq!(error.to_string(), "searchTerm: must not be blank");

        assert!(validate_search_term("").is_err());
    }
}
