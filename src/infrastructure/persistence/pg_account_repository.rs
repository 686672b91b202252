//! PostgreSQL implementation of account repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use super::bounded;
use crate::domain::entities::Account;
use crate::domain::repositories::{AccountRepository, RepositoryError};

/// PostgreSQL repository for registered accounts.
///
/// The `UNIQUE` constraint on `accounts.login` is authoritative for duplicates.
pub struct PgAccountRepository {
    pool: Arc<PgPool>,
    query_timeout: Duration,
}

impl PgAccountRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, login: &str, password_hash: &str) -> Result<Account, RepositoryError> {
        bounded(
            self.query_timeout,
            sqlx::query_as::<_, Account>(
                r#"
                INSERT INTO accounts (login, password_hash)
                VALUES ($1, $2)
                RETURNING id, login, password_hash, created_at, updated_at
                "#,
            )
            .bind(login)
            .bind(password_hash)
            .fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, RepositoryError> {
        bounded(
            self.query_timeout,
            sqlx::query_as::<_, Account>(
                r#"
                SELECT id, login, password_hash, created_at, updated_at
                FROM accounts
                WHERE login = $1
                "#,
            )
            .bind(login)
            .fetch_optional(self.pool.as_ref()),
        )
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, RepositoryError> {
        bounded(
            self.query_timeout,
            sqlx::query_as::<_, Account>(
                r#"
                SELECT id, login, password_hash, created_at, updated_at
                FROM accounts
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(self.pool.as_ref()),
        )
        .await
    }

    async fn exists_by_login(&self, login: &str) -> Result<bool, RepositoryError> {
        bounded(
            self.query_timeout,
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE login = $1)")
                .bind(login)
                .fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Account>, RepositoryError> {
        bounded(
            self.query_timeout,
            sqlx::query_as::<_, Account>(
                r#"
                SELECT id, login, password_hash, created_at, updated_at
                FROM accounts
                ORDER BY id
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref()),
        )
        .await
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        bounded(
            self.query_timeout,
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
                .fetch_one(self.pool.as_ref()),
        )
        .await
    }
}
