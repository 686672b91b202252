//! PostgreSQL implementation of listing repository.
//!
//! Filtered queries are assembled with [`QueryBuilder`]. User values are always
//! bound as parameters; the only interpolated fragments are the fixed column
//! and direction names rendered from [`SortBy`](crate::domain::entities::SortBy)
//! and [`SortDir`](crate::domain::entities::SortDir).

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;
use std::time::Duration;

use super::bounded;
use crate::domain::entities::{Listing, ListingPatch, ListingQuery, NewListing};
use crate::domain::repositories::{ListingRepository, RepositoryError};

const LISTING_COLUMNS: &str = "l.id, l.title, l.description, l.image_url, l.price, l.owner_id, \
     a.login AS owner_login, l.created_at, l.updated_at";

/// `SELECT` over `source` aliased as `l`, joined with the owning account.
fn select_from(source: &str) -> String {
    format!("SELECT {LISTING_COLUMNS} FROM {source} l JOIN accounts a ON a.id = l.owner_id")
}

/// Appends `WHERE` conditions for the owner and price bounds that are present.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ListingQuery) {
    let mut keyword = " WHERE ";

    if let Some(owner_id) = query.owner_id {
        qb.push(keyword).push("l.owner_id = ").push_bind(owner_id);
        keyword = " AND ";
    }
    if let Some(min_price) = query.min_price {
        qb.push(keyword).push("l.price >= ").push_bind(min_price);
        keyword = " AND ";
    }
    if let Some(max_price) = query.max_price {
        qb.push(keyword).push("l.price <= ").push_bind(max_price);
    }
}

pub(crate) fn list_query(query: &ListingQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(select_from("listings"));
    push_filters(&mut qb, query);

    let dir = query.sort_dir.keyword();
    qb.push(format!(" ORDER BY {} {dir}, l.id {dir}", query.sort_by.column()));
    qb.push(" LIMIT ")
        .push_bind(query.limit)
        .push(" OFFSET ")
        .push_bind(query.offset());
    qb
}

pub(crate) fn count_query(query: &ListingQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM listings l");
    push_filters(&mut qb, query);
    qb
}

pub(crate) fn update_query(
    id: i64,
    owner_id: i64,
    patch: ListingPatch,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("WITH updated AS (UPDATE listings SET ");

    if let Some(title) = patch.title {
        qb.push("title = ").push_bind(title).push(", ");
    }
    if let Some(description) = patch.description {
        qb.push("description = ").push_bind(description).push(", ");
    }
    if let Some(image_url) = patch.image_url {
        qb.push("image_url = ").push_bind(image_url).push(", ");
    }
    if let Some(price) = patch.price {
        qb.push("price = ").push_bind(price).push(", ");
    }

    qb.push("updated_at = NOW() WHERE id = ")
        .push_bind(id)
        .push(" AND owner_id = ")
        .push_bind(owner_id)
        .push(" RETURNING *) ")
        .push(select_from("updated"));
    qb
}

/// PostgreSQL repository for listings.
pub struct PgListingRepository {
    pool: Arc<PgPool>,
    query_timeout: Duration,
}

impl PgListingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn create(&self, new_listing: NewListing) -> Result<Listing, RepositoryError> {
        let sql = format!(
            r#"
            WITH inserted AS (
                INSERT INTO listings (title, description, image_url, price, owner_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            {}
            "#,
            select_from("inserted")
        );

        bounded(
            self.query_timeout,
            sqlx::query_as::<_, Listing>(&sql)
                .bind(new_listing.title)
                .bind(new_listing.description)
                .bind(new_listing.image_url)
                .bind(new_listing.price)
                .bind(new_listing.owner_id)
                .fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Listing>, RepositoryError> {
        let sql = format!("{} WHERE l.id = $1", select_from("listings"));

        bounded(
            self.query_timeout,
            sqlx::query_as::<_, Listing>(&sql)
                .bind(id)
                .fetch_optional(self.pool.as_ref()),
        )
        .await
    }

    async fn find_owner(&self, id: i64) -> Result<Option<i64>, RepositoryError> {
        bounded(
            self.query_timeout,
            sqlx::query_scalar::<_, i64>("SELECT owner_id FROM listings WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref()),
        )
        .await
    }

    async fn list(&self, query: &ListingQuery) -> Result<Vec<Listing>, RepositoryError> {
        let mut qb = list_query(query);

        bounded(
            self.query_timeout,
            qb.build_query_as::<Listing>().fetch_all(self.pool.as_ref()),
        )
        .await
    }

    async fn count(&self, query: &ListingQuery) -> Result<i64, RepositoryError> {
        let mut qb = count_query(query);

        bounded(
            self.query_timeout,
            qb.build_query_scalar::<i64>().fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        patch: ListingPatch,
    ) -> Result<Option<Listing>, RepositoryError> {
        let mut qb = update_query(id, owner_id, patch);

        bounded(
            self.query_timeout,
            qb.build_query_as::<Listing>()
                .fetch_optional(self.pool.as_ref()),
        )
        .await
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, RepositoryError> {
        let result = bounded(
            self.query_timeout,
            sqlx::query("DELETE FROM listings WHERE id = $1 AND owner_id = $2")
                .bind(id)
                .bind(owner_id)
                .execute(self.pool.as_ref()),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_all(&self) -> Result<i64, RepositoryError> {
        bounded(
            self.query_timeout,
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM listings")
                .fetch_one(self.pool.as_ref()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{SortBy, SortDir};
    use rust_decimal::Decimal;

    fn query() -> ListingQuery {
        ListingQuery {
            owner_id: None,
            min_price: None,
            max_price: None,
            sort_by: SortBy::CreatedAt,
            sort_dir: SortDir::Desc,
            page: 2,
            limit: 20,
        }
    }

    #[test]
    fn test_list_query_without_filters() {
        let qb = list_query(&query());

        assert!(!qb.sql().contains("WHERE"));
        assert!(qb
            .sql()
            .ends_with("ORDER BY l.created_at DESC, l.id DESC LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn test_list_query_with_all_filters() {
        let q = ListingQuery {
            owner_id: Some(3),
            min_price: Some(Decimal::new(10, 0)),
            max_price: Some(Decimal::new(20, 0)),
            sort_by: SortBy::Price,
            sort_dir: SortDir::Asc,
            ..query()
        };
        let qb = list_query(&q);

        assert!(qb.sql().contains(
            " WHERE l.owner_id = $1 AND l.price >= $2 AND l.price <= $3 ORDER BY l.price ASC, l.id ASC LIMIT $4 OFFSET $5"
        ));
    }

    #[test]
    fn test_count_query_only_max_price() {
        let q = ListingQuery {
            max_price: Some(Decimal::new(20, 0)),
            ..query()
        };
        let qb = count_query(&q);

        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM listings l WHERE l.price <= $1"
        );
    }

    #[test]
    fn test_update_query_sets_only_present_fields() {
        let patch = ListingPatch {
            title: Some("New".to_string()),
            image_url: Some(None),
            ..Default::default()
        };
        let qb = update_query(5, 2, patch);

        assert!(qb.sql().starts_with(
            "WITH updated AS (UPDATE listings SET title = $1, image_url = $2, updated_at = NOW() WHERE id = $3 AND owner_id = $4 RETURNING *)"
        ));
        assert!(!qb.sql().contains("description ="));
        assert!(!qb.sql().contains("price ="));
    }
}
