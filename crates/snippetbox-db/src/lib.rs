//! # Snippetbox DB
//!
//! PostgreSQL connection pool bootstrap and the SQL-backed implementations of
//! the data-store capabilities from `snippetbox-models`.
//!
//! # Example
//!
//! ```ignore
//! use snippetbox_db::{init_db_pool, run_migrations, PgSnippetRepository};
//!
//! let pool = init_db_pool(&config.dsn, config.max_connections).await?;
//! run_migrations(&pool).await?;
//! let snippets = PgSnippetRepository::new(pool.clone());
//! ```

pub mod snippets;
pub mod users;

use sqlx::postgres::PgPoolOptions;

pub use snippets::PgSnippetRepository;
pub use users::PgUserRepository;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens a PostgreSQL pool and checks it with a round trip.
///
/// Called once at startup; the returned pool is cheaply cloneable and safe
/// for concurrent checkout from every request.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    tracing::debug!(max_connections, "database pool ready");

    Ok(pool)
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
