//! Liveness probe for the backing store.

use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// Checks that the backing store answers queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), RepositoryError>;
}
