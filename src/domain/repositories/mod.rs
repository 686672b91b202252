//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence` and `crate::infrastructure::memory`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`AccountRepository`] - Account storage and lookup
//! - [`ListingRepository`] - Listing CRUD with filtering and pagination
//! - [`StoreHealth`] - Store liveness probe
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod account_repository;
pub mod error;
pub mod listing_repository;
pub mod store_health;

pub use account_repository::AccountRepository;
pub use error::RepositoryError;
pub use listing_repository::ListingRepository;
pub use store_health::StoreHealth;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use listing_repository::MockListingRepository;
#[cfg(test)]
pub use store_health::MockStoreHealth;
