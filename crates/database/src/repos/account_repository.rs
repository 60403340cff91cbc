//! Account repository for database operations.

use crate::entities::account::{NewUserAccount, UserAccount, UserRole};
use crate::types::{UserError, UserResult};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const ACCOUNT_COLUMNS: &str =
    "id, public_id, username, password_hash, role, created_at, updated_at, last_login_at";

/// Repository for account database operations
#[derive(Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find account by row ID
    pub async fn find_by_id(&self, id: i64) -> UserResult<Option<UserAccount>> {
        let row = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(|row| map_account(&row)))
    }

    /// Find account by exact username
    pub async fn find_by_username(&self, username: &str) -> UserResult<Option<UserAccount>> {
        let row = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(|row| map_account(&row)))
    }

    /// Find account by username regardless of case
    pub async fn find_by_username_ignore_case(
        &self,
        username: &str,
    ) -> UserResult<Option<UserAccount>> {
        let row = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE username = ? COLLATE NOCASE"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(|row| map_account(&row)))
    }

    /// All accounts, ordered for stable listings
    pub async fn list_all(&self) -> UserResult<Vec<UserAccount>> {
        let rows = sqlx::query(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users ORDER BY username COLLATE NOCASE"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(map_account).collect())
    }

    /// Whether a username is already taken (case-insensitive)
    pub async fn username_exists(&self, username: &str) -> UserResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE username = ? COLLATE NOCASE",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }

    /// Persist a prepared account
    pub async fn insert(&self, account: &NewUserAccount) -> UserResult<UserAccount> {
        let now = Utc::now().to_rfc3339();
        let public_id = cuid2::create_id();

        let result = sqlx::query(
            "INSERT INTO users (public_id, username, password_hash, role, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.role.to_string())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                UserError::UsernameAlreadyExists
            } else {
                UserError::DatabaseError(e.to_string())
            }
        })?;

        let user_id = result.last_insert_rowid();

        self.find_by_id(user_id)
            .await?
            .ok_or_else(|| UserError::DatabaseError("Failed to retrieve created account".to_string()))
    }

    /// Record a successful login
    pub async fn update_last_login(&self, user_id: i64) -> UserResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query("UPDATE users SET last_login_at = ?, updated_at = ? WHERE id = ?")
            .bind(&now)
            .bind(&now)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

fn map_account(row: &SqliteRow) -> UserAccount {
    UserAccount {
        id: row.get("id"),
        public_id: row.get("public_id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        role: UserRole::from(row.get::<String, _>("role").as_str()),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        last_login_at: row.get("last_login_at"),
    }
}
