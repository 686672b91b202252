//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries. Every call is bounded by the configured query timeout.
//!
//! # Repositories
//!
//! - [`PgAccountRepository`] - Account storage and lookup
//! - [`PgListingRepository`] - Listing CRUD with dynamic filtering
//! - [`PgStoreHealth`] - Connectivity probe

pub mod pg_account_repository;
pub mod pg_listing_repository;
pub mod pg_store_health;

pub use pg_account_repository::PgAccountRepository;
pub use pg_listing_repository::PgListingRepository;
pub use pg_store_health::PgStoreHealth;

use std::future::Future;
use std::time::Duration;

use crate::domain::repositories::RepositoryError;

/// Runs a store call, failing with [`RepositoryError::Timeout`] after `limit`.
pub(crate) async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(RepositoryError::from),
        Err(_) => {
            tracing::error!(timeout_ms = limit.as_millis() as u64, "Store call timed out");
            Err(RepositoryError::Timeout)
        }
    }
}
