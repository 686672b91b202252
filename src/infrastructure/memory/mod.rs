//! In-process store implementing every repository trait.
//!
//! Mirrors the PostgreSQL semantics that callers depend on: unique logins,
//! the listing owner foreign key, prices stored at two decimal places,
//! joined owner logins, cascade delete of listings, price-bound filters and
//! `(sort column, id)` ordering. Used by the HTTP test suites.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use tokio::sync::RwLock;

use crate::domain::entities::{
    Account, Listing, ListingPatch, ListingQuery, NewListing, SortBy, SortDir,
};
use crate::domain::repositories::{
    AccountRepository, ListingRepository, RepositoryError, StoreHealth,
};

#[derive(Default)]
struct Tables {
    accounts: BTreeMap<i64, Account>,
    listings: BTreeMap<i64, Listing>,
    next_account_id: i64,
    next_listing_id: i64,
}

impl Tables {
    fn with_owner_login(&self, mut listing: Listing) -> Listing {
        listing.owner_login = self
            .accounts
            .get(&listing.owner_id)
            .map(|a| a.login.clone());
        listing
    }

    fn matching<'a>(&'a self, query: &'a ListingQuery) -> impl Iterator<Item = &'a Listing> + 'a {
        self.listings.values().filter(move |l| {
            query.owner_id.is_none_or(|owner| l.owner_id == owner)
                && query.min_price.is_none_or(|min| l.price >= min)
                && query.max_price.is_none_or(|max| l.price <= max)
        })
    }
}

/// Rounds to the price column scale the way `NUMERIC(10,2)` does on write.
fn to_column_scale(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Thread-safe in-memory store.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes an account and, like `ON DELETE CASCADE`, all of its listings.
    pub async fn remove_account(&self, id: i64) -> bool {
        let mut tables = self.tables.write().await;
        tables.listings.retain(|_, l| l.owner_id != id);
        tables.accounts.remove(&id).is_some()
    }
}

fn compare(a: &Listing, b: &Listing, sort_by: SortBy, sort_dir: SortDir) -> Ordering {
    let primary = match sort_by {
        SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        SortBy::Price => a.price.cmp(&b.price),
    };
    let ordering = primary.then(a.id.cmp(&b.id));

    match sort_dir {
        SortDir::Asc => ordering,
        SortDir::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn create(&self, login: &str, password_hash: &str) -> Result<Account, RepositoryError> {
        let mut tables = self.tables.write().await;

        if tables.accounts.values().any(|a| a.login == login) {
            return Err(RepositoryError::UniqueViolation {
                constraint: Some("accounts_login_key".to_string()),
            });
        }

        tables.next_account_id += 1;
        let now = Utc::now();
        let account = Account::new(
            tables.next_account_id,
            login.to_string(),
            password_hash.to_string(),
            now,
            now,
        );
        tables.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.values().find(|a| a.login == login).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, RepositoryError> {
        Ok(self.tables.read().await.accounts.get(&id).cloned())
    }

    async fn exists_by_login(&self, login: &str) -> Result<bool, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.values().any(|a| a.login == login))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Account>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .values()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.tables.read().await.accounts.len() as i64)
    }
}

#[async_trait]
impl ListingRepository for InMemoryStore {
    async fn create(&self, new_listing: NewListing) -> Result<Listing, RepositoryError> {
        let mut tables = self.tables.write().await;

        if !tables.accounts.contains_key(&new_listing.owner_id) {
            return Err(RepositoryError::Database(sqlx::Error::Protocol(format!(
                "insert on listings violates foreign key: owner {} does not exist",
                new_listing.owner_id
            ))));
        }

        tables.next_listing_id += 1;
        let now = Utc::now();
        let listing = Listing {
            id: tables.next_listing_id,
            title: new_listing.title,
            description: new_listing.description,
            image_url: new_listing.image_url,
            price: to_column_scale(new_listing.price),
            owner_id: new_listing.owner_id,
            owner_login: None,
            is_owner: false,
            created_at: now,
            updated_at: now,
        };
        tables.listings.insert(listing.id, listing.clone());

        Ok(tables.with_owner_login(listing))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Listing>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .listings
            .get(&id)
            .cloned()
            .map(|l| tables.with_owner_login(l)))
    }

    async fn find_owner(&self, id: i64) -> Result<Option<i64>, RepositoryError> {
        Ok(self.tables.read().await.listings.get(&id).map(|l| l.owner_id))
    }

    async fn list(&self, query: &ListingQuery) -> Result<Vec<Listing>, RepositoryError> {
        let tables = self.tables.read().await;

        let mut rows: Vec<&Listing> = tables.matching(query).collect();
        rows.sort_by(|a, b| compare(a, b, query.sort_by, query.sort_dir));

        Ok(rows
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .map(|l| tables.with_owner_login(l.clone()))
            .collect())
    }

    async fn count(&self, query: &ListingQuery) -> Result<i64, RepositoryError> {
        Ok(self.tables.read().await.matching(query).count() as i64)
    }

    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        patch: ListingPatch,
    ) -> Result<Option<Listing>, RepositoryError> {
        let mut tables = self.tables.write().await;

        let Some(listing) = tables
            .listings
            .get_mut(&id)
            .filter(|l| l.owner_id == owner_id)
        else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            listing.title = title;
        }
        if let Some(description) = patch.description {
            listing.description = description;
        }
        if let Some(image_url) = patch.image_url {
            listing.image_url = image_url;
        }
        if let Some(price) = patch.price {
            listing.price = to_column_scale(price);
        }
        listing.updated_at = Utc::now();

        let updated = listing.clone();
        Ok(Some(tables.with_owner_login(updated)))
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;

        if tables.listings.get(&id).is_some_and(|l| l.owner_id == owner_id) {
            tables.listings.remove(&id);
            return Ok(true);
        }

        Ok(false)
    }

    async fn count_all(&self) -> Result<i64, RepositoryError> {
        Ok(self.tables.read().await.listings.len() as i64)
    }
}

#[async_trait]
impl StoreHealth for InMemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_listing(owner_id: i64, price: i64) -> NewListing {
        NewListing {
            owner_id,
            title: format!("Item {price}"),
            description: "Test item".to_string(),
            image_url: None,
            price: Decimal::new(price, 0),
        }
    }

    fn query() -> ListingQuery {
        ListingQuery {
            owner_id: None,
            min_price: None,
            max_price: None,
            sort_by: SortBy::Price,
            sort_dir: SortDir::Asc,
            page: 1,
            limit: 20,
        }
    }

    #[tokio::test]
    async fn test_duplicate_login_is_unique_violation() {
        let store = InMemoryStore::new();
        AccountRepository::create(&store, "alice", "hash").await.unwrap();

        let result = AccountRepository::create(&store, "alice", "hash").await;

        assert!(matches!(result, Err(RepositoryError::UniqueViolation { .. })));
    }

    #[tokio::test]
    async fn test_listing_carries_owner_login() {
        let store = InMemoryStore::new();
        let alice = AccountRepository::create(&store, "alice", "hash").await.unwrap();

        let listing = ListingRepository::create(&store, new_listing(alice.id, 10))
            .await
            .unwrap();

        assert_eq!(listing.owner_login.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_filter_and_sort_by_price() {
        let store = InMemoryStore::new();
        let alice = AccountRepository::create(&store, "alice", "hash").await.unwrap();
        for price in [50, 10, 30, 20, 40] {
            ListingRepository::create(&store, new_listing(alice.id, price))
                .await
                .unwrap();
        }

        let q = ListingQuery {
            min_price: Some(Decimal::new(20, 0)),
            max_price: Some(Decimal::new(40, 0)),
            ..query()
        };
        let rows = ListingRepository::list(&store, &q).await.unwrap();
        let prices: Vec<_> = rows.iter().map(|l| l.price).collect();

        assert_eq!(
            prices,
            vec![Decimal::new(20, 0), Decimal::new(30, 0), Decimal::new(40, 0)]
        );
        assert_eq!(ListingRepository::count(&store, &q).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_conditional_update_and_delete() {
        let store = InMemoryStore::new();
        let alice = AccountRepository::create(&store, "alice", "hash").await.unwrap();
        let listing = ListingRepository::create(&store, new_listing(alice.id, 10))
            .await
            .unwrap();

        let patch = ListingPatch {
            price: Some(Decimal::new(99, 0)),
            ..Default::default()
        };
        assert!(store.update(listing.id, alice.id + 1, patch.clone()).await.unwrap().is_none());
        assert!(store.update(listing.id, alice.id, patch).await.unwrap().is_some());

        assert!(!store.delete(listing.id, alice.id + 1).await.unwrap());
        assert!(store.delete(listing.id, alice.id).await.unwrap());
        assert!(store.find_owner(listing.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_account_cascades() {
        let store = InMemoryStore::new();
        let alice = AccountRepository::create(&store, "alice", "hash").await.unwrap();
        ListingRepository::create(&store, new_listing(alice.id, 10))
            .await
            .unwrap();

        assert!(store.remove_account(alice.id).await);
        assert_eq!(store.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_with_unknown_owner_fails() {
        let store = InMemoryStore::new();

        let result = ListingRepository::create(&store, new_listing(42, 10)).await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
        assert_eq!(store.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_price_is_stored_at_cent_scale() {
        let store = InMemoryStore::new();
        let alice = AccountRepository::create(&store, "alice", "hash").await.unwrap();
        let listing = ListingRepository::create(
            &store,
            NewListing {
                price: Decimal::new(12_345, 3),
                ..new_listing(alice.id, 0)
            },
        )
        .await
        .unwrap();

        assert_eq!(listing.price, Decimal::new(1_235, 2));

        let patch = ListingPatch {
            price: Some(Decimal::new(5_004, 3)),
            ..Default::default()
        };
        let updated = store.update(listing.id, alice.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.price, Decimal::new(500, 2));
    }
}
