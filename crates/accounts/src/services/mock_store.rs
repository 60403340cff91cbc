//! In-memory account store backing the service unit tests.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use userdesk_database::{NewUserAccount, UserAccount, UserError, UserResult};

use super::account_service::AccountStore;

/// Mutex-guarded in-memory store with the same observable behavior as the
/// sqlx repository: case-insensitive uniqueness and username-ordered
/// listings.
#[derive(Clone, Default)]
pub struct MockAccountStore {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    accounts: Vec<UserAccount>,
    next_id: i64,
}

impl MockAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for MockAccountStore {
    async fn find_by_username(&self, username: &str) -> UserResult<Option<UserAccount>> {
        let state = self.inner.lock().expect("mock store poisoned");
        Ok(state
            .accounts
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_by_username_ignore_case(
        &self,
        username: &str,
    ) -> UserResult<Option<UserAccount>> {
        let state = self.inner.lock().expect("mock store poisoned");
        Ok(state
            .accounts
            .iter()
            .find(|a| a.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn list_all(&self) -> UserResult<Vec<UserAccount>> {
        let state = self.inner.lock().expect("mock store poisoned");
        let mut accounts = state.accounts.clone();
        accounts.sort_by(|a, b| {
            a.username
                .to_ascii_lowercase()
                .cmp(&b.username.to_ascii_lowercase())
        });
        Ok(accounts)
    }

    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        let state = self.inner.lock().expect("mock store poisoned");
        Ok(state
            .accounts
            .iter()
            .any(|a| a.username.eq_ignore_ascii_case(username)))
    }

    async fn insert(&self, account: &NewUserAccount) -> UserResult<UserAccount> {
        let mut state = self.inner.lock().expect("mock store poisoned");

        if state
            .accounts
            .iter()
            .any(|a| a.username.eq_ignore_ascii_case(&account.username))
        {
            return Err(UserError::UsernameAlreadyExists);
        }

        state.next_id += 1;
        let now = Utc::now().to_rfc3339();
        let stored = UserAccount {
            id: state.next_id,
            public_id: cuid2::create_id(),
            username: account.username.clone(),
            password_hash: account.password_hash.clone(),
            role: account.role,
            created_at: now.clone(),
            updated_at: now,
            last_login_at: None,
        };

        state.accounts.push(stored.clone());
        Ok(stored)
    }
}
