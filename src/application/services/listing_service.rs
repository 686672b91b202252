//! Listing validation, ownership enforcement and paginated queries.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::entities::{
    DEFAULT_LIMIT, DEFAULT_PAGE, Listing, ListingFilter, ListingPatch, ListingQuery, MAX_LIMIT,
    NewListing, Page,
};
use crate::domain::repositories::{ListingRepository, RepositoryError};
use crate::utils::validators::validate_url;

/// Maximum title length in characters.
pub const TITLE_MAX_LEN: usize = 255;
/// Maximum image URL length in characters.
pub const IMAGE_URL_MAX_LEN: usize = 500;
/// Fractional digits kept by the `NUMERIC(10,2)` price column.
pub const PRICE_SCALE: u32 = 2;
/// Largest price that fits `NUMERIC(10,2)`: 9_999_999_999 * 10^-2.
pub const PRICE_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Fields accepted when creating a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListingInput {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: Decimal,
}

#[derive(Debug, Error)]
pub enum ListingError {
    /// Input rejected; the message names the first failing rule.
    #[error("{0}")]
    Validation(&'static str),

    #[error("Invalid listing ID")]
    InvalidId,

    #[error("Listing not found")]
    NotFound,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("No fields to update")]
    NoFields,

    #[error("Store unavailable")]
    Unavailable,

    #[error("{0}")]
    Internal(String),
}

impl From<RepositoryError> for ListingError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Timeout => ListingError::Unavailable,
            other => ListingError::Internal(other.to_string()),
        }
    }
}

/// Service enforcing listing rules on top of a [`ListingRepository`].
pub struct ListingService<L: ListingRepository + ?Sized> {
    repository: Arc<L>,
}

impl<L: ListingRepository + ?Sized> ListingService<L> {
    /// Creates a new listing service.
    pub fn new(repository: Arc<L>) -> Self {
        Self { repository }
    }

    /// Creates a listing owned by `owner_id`.
    ///
    /// An empty `image_url` is stored as `NULL`.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Validation`] for the first failing rule, in order:
    /// title present, title length, description present, price positive,
    /// price within column range, image URL format, image URL length.
    pub async fn create(&self, owner_id: i64, input: NewListingInput) -> Result<Listing, ListingError> {
        if input.title.is_empty() {
            return Err(ListingError::Validation("title is required"));
        }
        check_title_len(&input.title)?;
        if input.description.is_empty() {
            return Err(ListingError::Validation("description is required"));
        }
        check_price(input.price)?;

        let image_url = input.image_url.filter(|url| !url.is_empty());
        if let Some(url) = &image_url {
            check_image_url(url)?;
        }

        let listing = self
            .repository
            .create(NewListing {
                owner_id,
                title: input.title,
                description: input.description,
                image_url,
                price: input.price,
            })
            .await?;

        tracing::info!(listing_id = listing.id, owner_id, "Listing created");

        Ok(listing.mark_owner(Some(owner_id)))
    }

    /// Returns one page of listings matching `filter`.
    ///
    /// `caller_id` only affects the `is_owner` flag of each row.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Validation`] before touching the store if the
    /// price bounds or paging parameters are out of range.
    pub async fn list(
        &self,
        filter: ListingFilter,
        caller_id: Option<i64>,
    ) -> Result<Page<Listing>, ListingError> {
        let query = resolve_query(filter, None)?;
        self.fetch_page(query, caller_id).await
    }

    /// Returns one page of the owner's own listings.
    ///
    /// Price bounds in `filter` are ignored.
    pub async fn list_by_owner(
        &self,
        owner_id: i64,
        filter: ListingFilter,
    ) -> Result<Page<Listing>, ListingError> {
        let filter = ListingFilter {
            min_price: None,
            max_price: None,
            ..filter
        };
        let query = resolve_query(filter, Some(owner_id))?;
        self.fetch_page(query, Some(owner_id)).await
    }

    /// Retrieves a single listing.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::InvalidId`] for non-positive ids without a store call,
    /// and [`ListingError::NotFound`] if no listing has this id.
    pub async fn get_by_id(&self, id: i64, caller_id: Option<i64>) -> Result<Listing, ListingError> {
        check_id(id)?;

        self.repository
            .find_by_id(id)
            .await?
            .map(|listing| listing.mark_owner(caller_id))
            .ok_or(ListingError::NotFound)
    }

    /// Applies a partial update to a listing owned by `caller_id`.
    ///
    /// `image_url: Some(Some(""))` clears the image like `Some(None)`.
    ///
    /// # Errors
    ///
    /// In order: [`ListingError::InvalidId`], [`ListingError::Validation`] for any
    /// present field, [`ListingError::NotFound`], [`ListingError::Forbidden`],
    /// [`ListingError::NoFields`]. A listing deleted between the ownership check
    /// and the write is reported as [`ListingError::NotFound`].
    pub async fn update(
        &self,
        id: i64,
        caller_id: i64,
        mut patch: ListingPatch,
    ) -> Result<Listing, ListingError> {
        check_id(id)?;

        if let Some(title) = &patch.title {
            if title.is_empty() {
                return Err(ListingError::Validation("title cannot be empty"));
            }
            check_title_len(title)?;
        }
        if patch.description.as_deref() == Some("") {
            return Err(ListingError::Validation("description cannot be empty"));
        }
        if let Some(price) = patch.price {
            check_price(price)?;
        }
        if let Some(image_url) = &mut patch.image_url {
            if image_url.as_deref() == Some("") {
                *image_url = None;
            }
            if let Some(url) = image_url {
                check_image_url(url)?;
            }
        }

        self.check_owner(id, caller_id, "You can only edit your own listings")
            .await?;

        if patch.is_empty() {
            return Err(ListingError::NoFields);
        }

        let listing = self
            .repository
            .update(id, caller_id, patch)
            .await?
            .ok_or(ListingError::NotFound)?;

        tracing::info!(listing_id = id, owner_id = caller_id, "Listing updated");

        Ok(listing.mark_owner(Some(caller_id)))
    }

    /// Deletes a listing owned by `caller_id`.
    ///
    /// # Errors
    ///
    /// Same ordering as [`Self::update`] minus the field checks.
    pub async fn delete(&self, id: i64, caller_id: i64) -> Result<(), ListingError> {
        check_id(id)?;

        self.check_owner(id, caller_id, "You can only delete your own listings")
            .await?;

        if !self.repository.delete(id, caller_id).await? {
            return Err(ListingError::NotFound);
        }

        tracing::info!(listing_id = id, owner_id = caller_id, "Listing deleted");

        Ok(())
    }

    /// Counts every listing in the store.
    pub async fn count_all(&self) -> Result<i64, ListingError> {
        Ok(self.repository.count_all().await?)
    }

    async fn check_owner(
        &self,
        id: i64,
        caller_id: i64,
        denied: &'static str,
    ) -> Result<(), ListingError> {
        match self.repository.find_owner(id).await? {
            None => Err(ListingError::NotFound),
            Some(owner_id) if owner_id != caller_id => {
                tracing::warn!(listing_id = id, caller_id, "Ownership check failed");
                Err(ListingError::Forbidden(denied))
            }
            Some(_) => Ok(()),
        }
    }

    async fn fetch_page(
        &self,
        query: ListingQuery,
        caller_id: Option<i64>,
    ) -> Result<Page<Listing>, ListingError> {
        let total = self.repository.count(&query).await?;
        let items = self
            .repository
            .list(&query)
            .await?
            .into_iter()
            .map(|listing| listing.mark_owner(caller_id))
            .collect();

        Ok(Page::new(items, total, query.page, query.limit))
    }
}

/// Applies defaults to a raw filter, then validates the result.
fn resolve_query(filter: ListingFilter, owner_id: Option<i64>) -> Result<ListingQuery, ListingError> {
    let query = ListingQuery {
        owner_id,
        min_price: filter.min_price,
        max_price: filter.max_price,
        sort_by: filter.sort_by.unwrap_or_default(),
        sort_dir: filter.sort_dir.unwrap_or_default(),
        page: filter.page.unwrap_or(DEFAULT_PAGE),
        limit: filter.limit.unwrap_or(DEFAULT_LIMIT),
    };

    if query.min_price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(ListingError::Validation("min_price cannot be negative"));
    }
    if query.max_price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(ListingError::Validation("max_price cannot be negative"));
    }
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            return Err(ListingError::Validation(
                "min_price cannot be greater than max_price",
            ));
        }
    }
    if query.page < 1 {
        return Err(ListingError::Validation("page must be greater than 0"));
    }
    if !(1..=MAX_LIMIT).contains(&query.limit) {
        return Err(ListingError::Validation("limit must be between 1 and 100"));
    }
    if query.checked_offset().is_none() {
        return Err(ListingError::Validation("page is out of range"));
    }

    Ok(query)
}

fn check_id(id: i64) -> Result<(), ListingError> {
    if id <= 0 {
        return Err(ListingError::InvalidId);
    }
    Ok(())
}

fn check_title_len(title: &str) -> Result<(), ListingError> {
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(ListingError::Validation(
            "title must be less than 255 characters",
        ));
    }
    Ok(())
}

fn check_price(price: Decimal) -> Result<(), ListingError> {
    if price <= Decimal::ZERO {
        return Err(ListingError::Validation("price must be greater than 0"));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(ListingError::Validation(
            "price must have at most 2 decimal places",
        ));
    }
    if price > PRICE_MAX {
        return Err(ListingError::Validation(
            "price must not exceed 99999999.99",
        ));
    }
    Ok(())
}

fn check_image_url(url: &str) -> Result<(), ListingError> {
    if !validate_url(url) {
        return Err(ListingError::Validation("invalid image URL format"));
    }
    if url.chars().count() > IMAGE_URL_MAX_LEN {
        return Err(ListingError::Validation(
            "image URL must be less than 500 characters",
        ));
    }
    Ok(())
}
