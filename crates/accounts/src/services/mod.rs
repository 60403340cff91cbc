//! Business logic layer

pub mod account_service;
pub mod mock_store;

pub use account_service::{AccountService, AccountStore, DbAccountService};
pub use mock_store::MockAccountStore;
