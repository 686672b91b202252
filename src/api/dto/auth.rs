//! DTOs for registration, login and the current-user endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::AuthSession;
use crate::domain::entities::Account;

/// Request body for `POST /api/auth/register` and `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub login: String,
    pub password: String,
}

/// Public view of an account. The password hash is never included.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub login: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            login: account.login,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Successful authentication: `{user, token}`.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: AccountResponse,
    pub token: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.account.into(),
            token: session.token,
        }
    }
}
