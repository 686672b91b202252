//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod listings;

pub use auth::{login_handler, me_handler, register_handler};
pub use health::{fallback_handler, health_handler, root_handler};
pub use listings::{
    create_listing_handler, delete_listing_handler, get_listing_handler, list_listings_handler,
    my_listings_handler, update_listing_handler,
};
