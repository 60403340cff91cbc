use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tracing::{debug, info};
use userdesk_config::AuthConfig;
use userdesk_database::{AccountRepository, UserAccount, UserError};

pub mod password;

/// Verifies credentials and manages opaque session tokens persisted in the
/// `sessions` table. Sessions expire after the configured TTL; expired rows
/// are removed the next time their token is presented.
#[derive(Clone)]
pub struct Authenticator {
    pool: SqlitePool,
    accounts: AccountRepository,
    session_ttl: Duration,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("session not found")]
    SessionNotFound,
    #[error("session expired")]
    SessionExpired,
    #[error("invalid session token")]
    InvalidSession,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("account lookup failed: {0}")]
    Account(#[from] UserError),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
}

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

impl Authenticator {
    pub fn new(pool: SqlitePool, config: &AuthConfig) -> Self {
        let session_ttl = Duration::seconds(config.session_ttl_seconds as i64);

        Self {
            accounts: AccountRepository::new(pool.clone()),
            pool,
            session_ttl,
        }
    }

    /// Verify a username/password pair and open a session.
    ///
    /// Unknown usernames and wrong passwords are reported identically so the
    /// login page cannot be used to probe for accounts.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthError> {
        let Some(account) = self.accounts.find_by_username(username).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify_password(password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.accounts.update_last_login(account.id).await?;

        let session = self.issue_session(account.id).await?;
        info!(username = %account.username, "session opened");
        Ok(session)
    }

    /// Resolve a session token to its account.
    pub async fn authenticate_token(
        &self,
        token: &str,
    ) -> Result<(UserAccount, AuthSession), AuthError> {
        let row = sqlx::query("SELECT user_id, expires_at FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Err(AuthError::SessionNotFound);
        };

        let user_id: i64 = row.try_get("user_id")?;
        let expires_at: String = row.try_get("expires_at")?;

        let expires_at = DateTime::parse_from_rfc3339(&expires_at)
            .map_err(|_| AuthError::InvalidSession)?
            .with_timezone(&Utc);

        if expires_at <= Utc::now() {
            sqlx::query("DELETE FROM sessions WHERE token = ?")
                .bind(token)
                .execute(&self.pool)
                .await?;
            return Err(AuthError::SessionExpired);
        }

        let account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidSession)?;

        let session = AuthSession {
            token: token.to_owned(),
            user_id,
            expires_at,
        };

        Ok((account, session))
    }

    /// Revoke a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        debug!(revoked = result.rows_affected(), "session revoked");
        Ok(())
    }

    async fn issue_session(&self, user_id: i64) -> Result<AuthSession, AuthError> {
        let token = generate_session_token();
        let now = Utc::now();
        let expires_at = now + self.session_ttl;

        sqlx::query(
            "INSERT INTO sessions (user_id, token, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&token)
        .bind(now.to_rfc3339())
        .bind(expires_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(AuthSession {
            token,
            user_id,
            expires_at,
        })
    }
}

fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_tokens_are_long_and_unique() {
        let first = generate_session_token();
        let second = generate_session_token();

        assert_eq!(first.len(), 43);
        assert_ne!(first, second);
    }
}
