//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Account`] - A registered user identity
//! - [`Listing`] - A seller's posted item
//! - [`ListingFilter`] / [`ListingQuery`] - Filtering and pagination descriptors
//!
//! # Design Pattern
//!
//! Separate structs are used for writes:
//! - `NewListing` - For creating new records
//! - `ListingPatch` - For partial updates

pub mod account;
pub mod listing;
pub mod listing_filter;

pub use account::{Account, CallerIdentity};
pub use listing::{Listing, ListingPatch, NewListing};
pub use listing_filter::{
    DEFAULT_LIMIT, DEFAULT_PAGE, ListingFilter, ListingQuery, MAX_LIMIT, Page, SortBy, SortDir,
};
