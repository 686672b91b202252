//! DTOs for listing endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::NewListingInput;
use crate::domain::entities::{Listing, ListingFilter, ListingPatch, Page, SortBy, SortDir};

/// Request body for `POST /api/listings`.
#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub price: Decimal,
}

impl From<CreateListingRequest> for NewListingInput {
    fn from(req: CreateListingRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            image_url: req.image_url,
            price: req.price,
        }
    }
}

/// Request body for `PUT`/`PATCH /api/listings/{id}`.
///
/// All fields are optional; only provided fields are changed.
///
/// # `image_url` semantics
///
/// - **Absent** → leave existing value unchanged
/// - **`null`** or **`""`** → remove the image
/// - **URL** → validate and set
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct UpdateListingRequest {
    pub title: Option<String>,
    pub description: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub image_url: Option<Option<String>>,

    pub price: Option<Decimal>,
}

impl From<UpdateListingRequest> for ListingPatch {
    fn from(req: UpdateListingRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            image_url: req.image_url,
            price: req.price,
        }
    }
}

/// Query parameters for listing collections.
///
/// Numbers arrive as strings and are parsed with `serde_with`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListingQueryParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub min_price: Option<Decimal>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub max_price: Option<Decimal>,

    #[serde(default)]
    pub sort_by: Option<SortBy>,

    #[serde(default)]
    pub sort_dir: Option<SortDir>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

impl From<ListingQueryParams> for ListingFilter {
    fn from(params: ListingQueryParams) -> Self {
        Self {
            min_price: params.min_price,
            max_price: params.max_price,
            sort_by: params.sort_by,
            sort_dir: params.sort_dir,
            page: params.page,
            limit: params.limit,
        }
    }
}

/// Wire representation of a listing.
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: Decimal,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_login: Option<String>,
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            title: listing.title,
            description: listing.description,
            image_url: listing.image_url,
            price: listing.price,
            user_id: listing.owner_id,
            user_login: listing.owner_login,
            is_owner: listing.is_owner,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

/// One page of listings with pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginatedListings {
    pub data: Vec<ListingResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl From<Page<Listing>> for PaginatedListings {
    fn from(page: Page<Listing>) -> Self {
        Self {
            data: page.items.into_iter().map(ListingResponse::from).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}
