//! API route configuration.
//!
//! Access level is enforced per handler through the
//! [`crate::api::middleware::auth`] extractors.

use crate::api::handlers::{
    create_listing_handler, delete_listing_handler, get_listing_handler, health_handler,
    list_listings_handler, login_handler, me_handler, my_listings_handler, register_handler,
    update_listing_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All routes mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /health`          - Store connectivity check
/// - `POST   /auth/register`   - Create an account
/// - `POST   /auth/login`      - Exchange credentials for a token
/// - `GET    /auth/me`         - Current account (bearer)
/// - `GET    /listings`        - Filtered, paginated listings
/// - `POST   /listings`        - Create a listing (bearer)
/// - `GET    /listings/my`     - Caller's own listings (bearer)
/// - `GET    /listings/{id}`   - Single listing
/// - `PUT    /listings/{id}`   - Update a listing (bearer, owner only)
/// - `PATCH  /listings/{id}`   - Same as `PUT`
/// - `DELETE /listings/{id}`   - Delete a listing (bearer, owner only)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/me", get(me_handler))
        .route(
            "/listings",
            get(list_listings_handler).post(create_listing_handler),
        )
        .route("/listings/my", get(my_listings_handler))
        .route(
            "/listings/{id}",
            get(get_listing_handler)
                .put(update_listing_handler)
                .patch(update_listing_handler)
                .delete(delete_listing_handler),
        )
}
