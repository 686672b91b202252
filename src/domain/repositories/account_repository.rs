//! Repository trait for account data access.

use crate::domain::entities::Account;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// Repository interface for registered accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccountRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - In-process store used by tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Inserts a new account with an already hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::UniqueViolation`] if the login is taken.
    async fn create(&self, login: &str, password_hash: &str) -> Result<Account, RepositoryError>;

    /// Finds an account by its exact login.
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, RepositoryError>;

    /// Finds an account by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, RepositoryError>;

    /// Checks whether a login is already registered.
    async fn exists_by_login(&self, login: &str) -> Result<bool, RepositoryError>;

    /// Lists accounts ordered by id, newest last.
    ///
    /// # Arguments
    ///
    /// - `limit` - Maximum number of rows
    /// - `offset` - Rows to skip
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Account>, RepositoryError>;

    /// Counts all registered accounts.
    async fn count(&self) -> Result<i64, RepositoryError>;
}
