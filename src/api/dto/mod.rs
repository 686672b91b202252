//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Domain entities
//! never cross the HTTP boundary directly.

pub mod auth;
pub mod envelope;
pub mod health;
pub mod listing;

pub use envelope::ApiResponse;
