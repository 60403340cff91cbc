//! User account entity definitions

use serde::{Deserialize, Serialize};

/// A persisted user account.
///
/// The password hash never leaves the server: it is skipped on
/// serialization so account lists can be rendered or returned as JSON
/// without leaking credential material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(skip_serializing)]
    pub id: i64,
    pub public_id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
}

impl UserAccount {
    /// Textual identity shown on info and error pages.
    pub fn display_string(&self) -> String {
        format!("{} ({})", self.username, self.role.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// An account that has been built and validated but not yet persisted.
/// The repository assigns ids and timestamps when the account is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserAccount {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
}

/// User role enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!(UserRole::from("admin"), UserRole::Admin);
        assert_eq!(UserRole::from("user"), UserRole::User);
        assert_eq!(UserRole::from("something-else"), UserRole::User);
        assert_eq!(UserRole::Admin.as_str(), "admin");
    }

    #[test]
    fn serialization_skips_password_hash() {
        let account = UserAccount {
            id: 1,
            public_id: "pid".to_string(),
            username: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: UserRole::User,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            last_login_at: None,
        };

        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("alice"));
    }

    #[test]
    fn display_string_names_user_and_role() {
        let account = UserAccount {
            id: 7,
            public_id: "pid".to_string(),
            username: "root".to_string(),
            password_hash: String::new(),
            role: UserRole::Admin,
            created_at: String::new(),
            updated_at: String::new(),
            last_login_at: None,
        };

        assert_eq!(account.display_string(), "root (admin)");
    }
}
