//! Account entity representing a registered user.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A registered user identity.
///
/// `password_hash` holds an argon2 PHC string and must never leave the
/// service boundary; response DTOs copy only the public fields.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i64,
    pub login: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new Account instance.
    pub fn new(
        id: i64,
        login: String,
        password_hash: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            login,
            password_hash,
            created_at,
            updated_at,
        }
    }
}

/// Caller identity resolved from a verified bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub id: i64,
    pub login: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_creation() {
        let now = Utc::now();
        let account = Account::new(7, "seller_1".to_string(), "$argon2id$hash".to_string(), now, now);

        assert_eq!(account.id, 7);
        assert_eq!(account.login, "seller_1");
        assert_eq!(account.created_at, account.updated_at);
    }
}
