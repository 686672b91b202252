//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::account_service::AccountService`] - Registration, login and account lookup
//! - [`services::listing_service::ListingService`] - Listing validation, ownership and queries
//! - [`services::credential_service::JwtCredentialService`] - Password hashing and session tokens

pub mod services;
