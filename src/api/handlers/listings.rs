//! Handlers for listing endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::api::dto::ApiResponse;
use crate::api::dto::listing::{
    CreateListingRequest, ListingQueryParams, ListingResponse, PaginatedListings,
    UpdateListingRequest,
};
use crate::api::middleware::auth::{AuthenticatedCaller, Caller};
use crate::error::AppError;
use crate::state::AppState;

/// Parses the `{id}` path segment, mapping garbage to the invalid-id error.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::bad_request("Invalid listing ID"))
}

/// Creates a listing owned by the caller.
///
/// # Endpoint
///
/// `POST /api/listings` (bearer required)
///
/// # Request Body
///
/// ```json
/// {
///   "title": "City bike",
///   "description": "Barely used",
///   "image_url": "https://example.com/bike.jpg",  // optional
///   "price": 150.00
/// }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: The stored listing with `is_owner = true`
/// - **400 Bad Request**: First failing validation rule
/// - **401 Unauthorized**: Missing or invalid token
pub async fn create_listing_handler(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    payload: Result<Json<CreateListingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ListingResponse>>), AppError> {
    let Json(req) = payload?;

    let listing = state
        .listing_service
        .create(caller.id, req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            listing.into(),
            "Listing created successfully",
        )),
    ))
}

/// Lists listings with optional price filter, sorting and pagination.
///
/// # Endpoint
///
/// `GET /api/listings?min_price=&max_price=&sort_by=created_at|price&sort_dir=asc|desc&page=&limit=`
///
/// A valid bearer token marks the caller's own rows with `is_owner`.
pub async fn list_listings_handler(
    State(state): State<AppState>,
    caller: Caller,
    params: Result<Query<ListingQueryParams>, QueryRejection>,
) -> Result<Json<ApiResponse<PaginatedListings>>, AppError> {
    let Query(params) = params?;

    let page = state
        .listing_service
        .list(params.into(), caller.id())
        .await?;

    Ok(Json(ApiResponse::data(page.into())))
}

/// Lists the caller's own listings. Price bounds are ignored.
///
/// # Endpoint
///
/// `GET /api/listings/my` (bearer required)
pub async fn my_listings_handler(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    params: Result<Query<ListingQueryParams>, QueryRejection>,
) -> Result<Json<ApiResponse<PaginatedListings>>, AppError> {
    let Query(params) = params?;

    let page = state
        .listing_service
        .list_by_owner(caller.id, params.into())
        .await?;

    Ok(Json(ApiResponse::data(page.into())))
}

/// Fetches a single listing.
///
/// # Endpoint
///
/// `GET /api/listings/{id}`
///
/// # Response Codes
///
/// - **200 OK**: The listing
/// - **400 Bad Request**: Non-numeric or non-positive id
/// - **404 Not Found**: No listing with this id
pub async fn get_listing_handler(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ListingResponse>>, AppError> {
    let id = parse_id(&id)?;

    let listing = state.listing_service.get_by_id(id, caller.id()).await?;

    Ok(Json(ApiResponse::data(listing.into())))
}

/// Partially updates a listing owned by the caller.
///
/// # Endpoint
///
/// `PUT /api/listings/{id}` or `PATCH /api/listings/{id}` (bearer required)
///
/// # Response Codes
///
/// - **200 OK**: The updated listing
/// - **400 Bad Request**: Invalid id, failing field, or no fields supplied
/// - **403 Forbidden**: Listing belongs to another account
/// - **404 Not Found**: No listing with this id
pub async fn update_listing_handler(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(id): Path<String>,
    payload: Result<Json<UpdateListingRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ListingResponse>>, AppError> {
    let id = parse_id(&id)?;
    let Json(req) = payload?;

    let listing = state
        .listing_service
        .update(id, caller.id, req.into())
        .await?;

    Ok(Json(ApiResponse::with_message(
        listing.into(),
        "Listing updated successfully",
    )))
}

/// Deletes a listing owned by the caller.
///
/// # Endpoint
///
/// `DELETE /api/listings/{id}` (bearer required)
pub async fn delete_listing_handler(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id(&id)?;

    state.listing_service.delete(id, caller.id).await?;

    Ok(Json(ApiResponse::message("Listing deleted successfully")))
}
