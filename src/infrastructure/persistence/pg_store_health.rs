//! PostgreSQL connectivity probe.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use super::bounded;
use crate::domain::repositories::{RepositoryError, StoreHealth};

pub struct PgStoreHealth {
    pool: Arc<PgPool>,
    query_timeout: Duration,
}

impl PgStoreHealth {
    pub fn new(pool: Arc<PgPool>, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl StoreHealth for PgStoreHealth {
    async fn ping(&self) -> Result<(), RepositoryError> {
        bounded(
            self.query_timeout,
            sqlx::query("SELECT 1").execute(self.pool.as_ref()),
        )
        .await
        .map(|_| ())
    }
}
