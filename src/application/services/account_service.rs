//! Account registration, login and lookup.

use std::sync::Arc;

use thiserror::Error;

use crate::application::services::credential_service::{CredentialError, CredentialService};
use crate::domain::entities::Account;
use crate::domain::repositories::{AccountRepository, RepositoryError};
use crate::utils::validators::{validate_login, validate_password};

/// Authenticated account plus a freshly issued session token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub account: Account,
    pub token: String,
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(
        "Login must be 3-50 characters long and contain only letters, numbers, and underscores"
    )]
    InvalidLogin,

    #[error("Password must be at least 6 characters long and contain letters and digits")]
    WeakPassword,

    #[error("User with this login already exists")]
    AlreadyExists,

    /// Unknown login and wrong password are deliberately indistinguishable.
    #[error("Invalid login or password")]
    InvalidCredentials,

    #[error("User not found")]
    NotFound,

    #[error("Store unavailable")]
    Unavailable,

    #[error("{0}")]
    Internal(String),
}

impl From<RepositoryError> for AccountError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::UniqueViolation { .. } => AccountError::AlreadyExists,
            RepositoryError::Timeout => AccountError::Unavailable,
            RepositoryError::Database(e) => AccountError::Internal(e.to_string()),
        }
    }
}

impl From<CredentialError> for AccountError {
    fn from(e: CredentialError) -> Self {
        AccountError::Internal(e.to_string())
    }
}

/// Service for registering and authenticating accounts.
pub struct AccountService<A: AccountRepository + ?Sized, C: CredentialService + ?Sized> {
    repository: Arc<A>,
    credentials: Arc<C>,
}

impl<A: AccountRepository + ?Sized, C: CredentialService + ?Sized> AccountService<A, C> {
    /// Creates a new account service.
    pub fn new(repository: Arc<A>, credentials: Arc<C>) -> Self {
        Self {
            repository,
            credentials,
        }
    }

    /// Registers a new account and returns it with a session token.
    ///
    /// # Errors
    ///
    /// Checks run in order, first failure wins:
    /// - [`AccountError::InvalidLogin`] - login format
    /// - [`AccountError::WeakPassword`] - password strength
    /// - [`AccountError::AlreadyExists`] - login taken (pre-check or unique constraint)
    ///
    /// Returns [`AccountError::Internal`] or [`AccountError::Unavailable`] on store
    /// and hashing failures.
    pub async fn register(&self, login: &str, password: &str) -> Result<AuthSession, AccountError> {
        if !validate_login(login) {
            return Err(AccountError::InvalidLogin);
        }

        if !validate_password(password) {
            return Err(AccountError::WeakPassword);
        }

        if self.repository.exists_by_login(login).await? {
            return Err(AccountError::AlreadyExists);
        }

        let password_hash = self.credentials.hash_password(password)?;
        let account = self.repository.create(login, &password_hash).await?;
        let token = self.credentials.issue_token(account.id, &account.login)?;

        tracing::info!(user_id = account.id, login = %account.login, "Account registered");

        Ok(AuthSession { account, token })
    }

    /// Authenticates by login and password.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] for an unknown login or a wrong
    /// password. Store failures are reported as such.
    pub async fn login(&self, login: &str, password: &str) -> Result<AuthSession, AccountError> {
        let account = self
            .repository
            .find_by_login(login)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self
            .credentials
            .verify_password(&account.password_hash, password)
        {
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.credentials.issue_token(account.id, &account.login)?;

        Ok(AuthSession { account, token })
    }

    /// Retrieves an account by id.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if the account does not exist.
    pub async fn get_by_id(&self, id: i64) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)
    }

    /// Lists accounts for operator tooling.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Account>, AccountError> {
        Ok(self.repository.list(limit, offset).await?)
    }

    /// Counts registered accounts.
    pub async fn count(&self) -> Result<i64, AccountError> {
        Ok(self.repository.count().await?)
    }
}
