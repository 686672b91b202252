//! Listing entity representing a seller's posted item.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// A classified listing.
///
/// `owner_login` is joined from the owning account when available.
/// `is_owner` is never persisted: it is computed per request against the
/// caller identity.
#[derive(Debug, Clone, FromRow)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: Decimal,
    pub owner_id: i64,
    pub owner_login: Option<String>,
    #[sqlx(skip)]
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Sets `is_owner` from an optional caller id.
    pub fn mark_owner(mut self, caller_id: Option<i64>) -> Self {
        self.is_owner = caller_id == Some(self.owner_id);
        self
    }
}

/// Input data for creating a new listing.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: Decimal,
}

/// Partial update for an existing listing.
///
/// `None` fields are left unchanged.
/// `image_url: Some(None)` clears the image; `Some(Some(url))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<Option<String>>,
    pub price: Option<Decimal>,
}

impl ListingPatch {
    /// Returns true when no field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.price.is_none()
    }
}
