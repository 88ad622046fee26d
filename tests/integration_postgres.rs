//! Repository tests against a real PostgreSQL server.
//!
//! Run with `DATABASE_URL` pointing at a server where the test user may
//! create databases: `cargo test -- --ignored`.

use snippetbox_db::{PgSnippetRepository, PgUserRepository};
use snippetbox_models::{ModelError, SnippetId, SnippetRepository, UserRepository};
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL server"]
async fn test_snippet_insert_and_get(pool: PgPool) {
    let repo = PgSnippetRepository::new(pool);

    let id = repo.insert("title", "content", 7).await.unwrap();
    let snippet = repo.get(id).await.unwrap();

    assert_eq!(snippet.title, "title");
    assert_eq!(snippet.content, "content");
    assert_eq!((snippet.expires - snippet.created).num_days(), 7);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL server"]
async fn test_expired_snippets_are_hidden(pool: PgPool) {
    let repo = PgSnippetRepository::new(pool.clone());
    let id = repo.insert("old", "content", 1).await.unwrap();

    sqlx::query("UPDATE snippets SET created = created - INTERVAL '2 days', expires = expires - INTERVAL '2 days' WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(matches!(repo.get(id).await, Err(ModelError::NoRecord)));
    assert!(repo.latest().await.unwrap().is_empty());
    assert!(matches!(
        repo.get(SnippetId::new(9999)).await,
        Err(ModelError::NoRecord)
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL server"]
async fn test_latest_is_newest_first_and_limited(pool: PgPool) {
    let repo = PgSnippetRepository::new(pool);
    for n in 0..12 {
        repo.insert(&format!("snippet {n}"), "content", 365).await.unwrap();
    }

    let latest = repo.latest().await.unwrap();

    assert_eq!(latest.len(), 10);
    assert_eq!(latest[0].title, "snippet 11");
    assert!(latest.windows(2).all(|pair| pair[0].id > pair[1].id));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL server"]
async fn test_user_signup_and_authenticate(pool: PgPool) {
    let repo = PgUserRepository::new(pool);

    let id = repo
        .insert("Bob", "bob@example.com", "validpass123")
        .await
        .unwrap();

    assert_eq!(
        repo.authenticate("BOB@example.com", "validpass123").await.unwrap(),
        id
    );
    assert!(matches!(
        repo.authenticate("bob@example.com", "wrongpass123").await,
        Err(ModelError::InvalidCredentials)
    ));
    assert!(matches!(
        repo.authenticate("nobody@example.com", "validpass123").await,
        Err(ModelError::InvalidCredentials)
    ));

    assert!(repo.exists(id).await.unwrap());
    let user = repo.get(id).await.unwrap();
    assert_eq!(user.name, "Bob");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL server"]
async fn test_duplicate_email_ignores_case(pool: PgPool) {
    let repo = PgUserRepository::new(pool);
    repo.insert("Bob", "bob@example.com", "validpass123")
        .await
        .unwrap();

    let result = repo.insert("Robert", "Bob@Example.com", "validpass123").await;

    assert!(matches!(result, Err(ModelError::DuplicateEmail)));
}
