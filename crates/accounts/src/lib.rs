//! Userdesk accounts crate
//!
//! Business logic for user accounts: the registration/search/login form
//! types, per-form validation, and the `AccountService` that the web layer
//! delegates to. The service is generic over its backing store so the unit
//! tests run against an in-memory mock while production uses the sqlx
//! repository.

pub mod forms;
pub mod services;
pub mod utils;

pub use forms::{LoginForm, RegistrationForm, SearchForm};
pub use services::{AccountService, AccountStore, DbAccountService, MockAccountStore};
pub use utils::validation::{validate_registration, validate_search_term, FieldError};

// Re-export the entity types callers deal in.
pub use userdesk_database::{NewUserAccount, UserAccount, UserError, UserResult, UserRole};
