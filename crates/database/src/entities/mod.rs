//! Entity definitions for the database layer

pub mod account;

pub use account::{NewUserAccount, UserAccount, UserRole};
