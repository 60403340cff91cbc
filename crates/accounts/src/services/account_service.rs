//! Account service for managing user accounts.

use sqlx::SqlitePool;
use tracing::info;
use userdesk_auth::password;
use userdesk_database::{
    AccountRepository, NewUserAccount, UserAccount, UserError, UserResult, UserRole,
};

use super::mock_store::MockAccountStore;
use crate::forms::RegistrationForm;
use crate::utils::validation::validate_registration;

/// Service for account lookups and registration.
///
/// Creation is split in two, matching the registration flow: `create_user`
/// builds and validates an unsaved account (hashing the password), and
/// `save_user` persists it. The handler stores flash data between the two
/// steps.
#[derive(Clone)]
pub struct AccountService<S> {
    store: S,
}

/// The production service over the sqlx repository.
pub type DbAccountService = AccountService<AccountRepository>;

impl AccountService<AccountRepository> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            store: AccountRepository::new(pool),
        }
    }
}

impl AccountService<MockAccountStore> {
    pub fn new_for_testing() -> Self {
        Self {
            store: MockAccountStore::new(),
        }
    }
}

impl<S> AccountService<S>
where
    S: AccountStore,
{
    /// Get an account by exact username
    pub async fn get_user_by_username(&self, username: &str) -> UserResult<UserAccount> {
        self.store
            .find_by_username(username)
            .await?
            .ok_or(UserError::UserNotFound)
    }

    /// Get an account by username, ignoring case
    pub async fn get_user_by_username_ignore_case(
        &self,
        username: &str,
    ) -> UserResult<Option<UserAccount>> {
        self.store.find_by_username_ignore_case(username).await
    }

    /// All accounts, ordered by username
    pub async fn get_all_users(&self) -> UserResult<Vec<UserAccount>> {
        self.store.list_all().await
    }

    /// Build an unsaved account from a registration form.
    ///
    /// Re-validates the form, rejects taken usernames (case-insensitive),
    /// and hashes the password. Regular registration always yields the
    /// `user` role.
    pub async fn create_user(&self, form: &RegistrationForm) -> UserResult<NewUserAccount> {
        let errors = validate_registration(form);
        if let Some(error) = errors.first() {
            return Err(UserError::ValidationFailed(error.to_string()));
        }

        if self.store.username_exists(&form.username).await? {
            return Err(UserError::UsernameAlreadyExists);
        }

        let password_hash = password::hash_password(&form.password)
            .map_err(|_| UserError::DatabaseError("Password hashing failed".to_string()))?;

        Ok(NewUserAccount {
            username: form.username.clone(),
            password_hash,
            role: UserRole::User,
        })
    }

    /// Persist a prepared account
    pub async fn save_user(&self, account: NewUserAccount) -> UserResult<UserAccount> {
        let saved = self.store.insert(&account).await?;

        info!(username = %saved.username, id = saved.id, "created new account");

        Ok(saved)
    }
}

/// Trait for account stores to allow generic usage
pub trait AccountStore {
    async fn find_by_username(&self, username: &str) -> UserResult<Option<UserAccount>>;
    async fn find_by_username_ignore_case(
        &self,
        username: &str,
    ) -> UserResult<Option<UserAccount>>;
    async fn list_all(&self) -> UserResult<Vec<UserAccount>>;
    async fn username_exists(&self, username: &str) -> UserResult<bool>;
    async fn insert(&self, account: &NewUserAccount) -> UserResult<UserAccount>;
}

impl AccountStore for AccountRepository {
    async fn find_by_username(&self, username: &str) -> UserResult<Option<UserAccount>> {
        self.find_by_username(username).await
    }

    async fn find_by_username_ignore_case(
        &self,
        username: &str,
    ) -> UserResult<Option<UserAccount>> {
        self.find_by_username_ignore_case(username).await
    }

    async fn list_all(&self) -> UserResult<Vec<UserAccount>> {
        self.list_all().await
    }

    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        self.username_exists(username).await
    }

    async fn insert(&self, account: &NewUserAccount) -> UserResult<UserAccount> {
        self.insert(account).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> AccountService<MockAccountStore> {
        AccountService::new_for_testing()
    }

    fn valid_registration() -> RegistrationForm {
        RegistrationForm {
            username: "alice".to_string(),
            password: "Password123".to_string(),
            repeat_password: "Password123".to_string(),
        }
    }

    async fn register(service: &AccountService<MockAccountStore>, username: &str) -> UserAccount {
        let mut form = valid_registration();
        form.username = username.to_string();
        let new_account = service.create_user(&form).await.unwrap();
        service.save_user(new_account).await.unwrap()
    }

    #[tokio::test]
    async fn create_and_save_round_trip() {
        let service = create_test_service();

        let new_account = service.create_user(&valid_registration()).await.unwrap();
        assert_eq!(new_account.username, "alice");
        assert_eq!(new_account.role, UserRole::User);
        assert!(new_account.password_hash.starts_with("$argon2"));
        assert_ne!(new_account.password_hash, "Password123");

        let saved = service.save_user(new_account).await.unwrap();
        assert!(saved.id > 0);
        assert!(!saved.public_id.is_empty());

        let found = service.get_user_by_username("alice").await.unwrap();
        assert_eq!(found.id, saved.id);
    }

    #[tokio::test]
    async fn create_user_rejects_invalid_forms() {
        let service = create_test_service();
        let mut form = valid_registration();
        form.repeat_password = "Different123".to_string();

        let result = service.create_user(&form).await;
        assert!(matches!(result, Err(UserError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn create_user_rejects_taken_usernames_ignoring_case() {
        let service = create_test_service();
        register(&service, "alice").await;

        let mut form = valid_registration();
        form.username = "ALICE".to_string();

        let result = service.create_user(&form).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists)));
    }

    #[tokio::test]
    async fn get_user_by_username_is_exact() {
        let service = create_test_service();
        register(&service, "alice").await;

        assert!(service.get_user_by_username("alice").await.is_ok());

        let result = service.get_user_by_username("Alice").await;
        assert!(matches!(result, Err(UserError::UserNotFound)));
    }

    #[tokio::test]
    async fn ignore_case_lookup_finds_any_casing() {
        let service = create_test_service();
        register(&service, "alice").await;

        let found = service
            .get_user_by_username_ignore_case("AlIcE")
            .await
            .unwrap();
        assert!(found.is_some());

        let missing = service
            .get_user_by_username_ignore_case("bob")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn get_all_users_returns_every_account_in_order() {
        let service = create_test_service();
        register(&service, "carol").await;
        register(&service, "alice").await;
        register(&service, "bob").await;

        let all = service.get_all_users().await.unwrap();
        let names: Vec<&str> = all.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[tokio::test]
    async fn saving_a_duplicate_surfaces_the_store_error() {
        let service = create_test_service();
        register(&service, "alice").await;

        // Prepared before the first save, persisted after it.
        let stale = NewUserAccount {
            username: "alice".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            role: UserRole::User,
        };

        let result = service.save_user(stale).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists)));
    }
}
