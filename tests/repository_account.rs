mod common;

use sqlx::PgPool;
use std::sync::Arc;
use marketplace_api::domain::repositories::{AccountRepository, RepositoryError};
use marketplace_api::infrastructure::persistence::PgAccountRepository;

fn repo(pool: PgPool) -> PgAccountRepository {
    PgAccountRepository::new(Arc::new(pool), common::pg_query_timeout())
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_account(pool: PgPool) {
    let repo = repo(pool);

    let account = repo.create("alice", "hash").await.unwrap();

    assert_eq!(account.login, "alice");
    assert_eq!(account.password_hash, "hash");
    assert!(account.id > 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_login_is_unique_violation(pool: PgPool) {
    let repo = repo(pool);
    repo.create("alice", "hash").await.unwrap();

    let result = repo.create("alice", "other").await;

    assert!(matches!(
        result,
        Err(RepositoryError::UniqueViolation { .. })
    ));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_login_and_id(pool: PgPool) {
    let repo = repo(pool);
    let created = repo.create("bob", "hash").await.unwrap();

    let by_login = repo.find_by_login("bob").await.unwrap().unwrap();
    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(by_login.id, created.id);
    assert_eq!(by_id.login, "bob");
    assert!(repo.find_by_login("nobody").await.unwrap().is_none());
    assert!(repo.find_by_id(created.id + 1000).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_exists_list_and_count(pool: PgPool) {
    let repo = repo(pool);
    repo.create("first", "hash").await.unwrap();
    repo.create("second", "hash").await.unwrap();

    assert!(repo.exists_by_login("first").await.unwrap());
    assert!(!repo.exists_by_login("third").await.unwrap());
    assert_eq!(repo.count().await.unwrap(), 2);

    let listed = repo.list(10, 0).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].login, "first");

    assert_eq!(repo.list(10, 1).await.unwrap().len(), 1);
}
