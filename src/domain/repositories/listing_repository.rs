//! Repository trait for listing data access.

use crate::domain::entities::{Listing, ListingPatch, ListingQuery, NewListing};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// Repository interface for marketplace listings.
///
/// Every returned [`Listing`] carries `owner_login` joined from the owning
/// account. `is_owner` is left `false`; the service layer sets it per caller.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgListingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - In-process store used by tests
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_listing.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Inserts a listing and returns it with the owner's login.
    async fn create(&self, new_listing: NewListing) -> Result<Listing, RepositoryError>;

    /// Finds a listing by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Listing>, RepositoryError>;

    /// Returns the owner id of a listing, or `None` if it does not exist.
    async fn find_owner(&self, id: i64) -> Result<Option<i64>, RepositoryError>;

    /// Fetches one page of listings matching `query`.
    ///
    /// Price bounds and `owner_id` are applied only when present. Results are
    /// ordered by `query.sort_by` and `query.sort_dir`, then by id in the same
    /// direction.
    async fn list(&self, query: &ListingQuery) -> Result<Vec<Listing>, RepositoryError>;

    /// Counts all listings matching the filters of `query`, ignoring paging.
    async fn count(&self, query: &ListingQuery) -> Result<i64, RepositoryError>;

    /// Applies `patch` to the listing if it is still owned by `owner_id`.
    ///
    /// Only fields present in [`ListingPatch`] are modified and `updated_at`
    /// is refreshed.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Listing))` with the updated row
    /// - `Ok(None)` if no row matched `id` + `owner_id`
    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        patch: ListingPatch,
    ) -> Result<Option<Listing>, RepositoryError>;

    /// Deletes the listing if it is still owned by `owner_id`.
    ///
    /// Returns `Ok(true)` if a row was removed.
    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, RepositoryError>;

    /// Counts every listing in the store.
    async fn count_all(&self) -> Result<i64, RepositoryError>;
}
