use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dotenvy::dotenv;
use snippetbox::logging::init_tracing;
use snippetbox::router::init_router;
use snippetbox::server::{load_tls, serve};
use snippetbox::state::AppState;
use snippetbox::templates::Templates;
use snippetbox_config::Config;
use snippetbox_db::{PgSnippetRepository, PgUserRepository, init_db_pool, run_migrations};
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::PostgresStore;

const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() {
    dotenv().ok();
    let config = Config::parse();

    if let Err(e) = init_tracing(config.log_dir.as_deref()) {
        eprintln!("failed to initialise logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!(error = ?e, "server stopped");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let tls = load_tls(&config).await?;

    let pool = init_db_pool(&config.dsn, config.max_connections).await?;
    run_migrations(&pool).await?;

    let templates = Templates::new()?;

    let session_store = PostgresStore::new(pool.clone());
    session_store.migrate().await?;

    let cleanup_store = session_store.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            tracing::debug!("deleting expired sessions");
            if let Err(e) = cleanup_store.delete_expired().await {
                tracing::error!(error = ?e, "session cleanup failed");
            }
        }
    });

    let state = AppState::new(
        Arc::new(PgSnippetRepository::new(pool.clone())),
        Arc::new(PgUserRepository::new(pool)),
        templates,
        &config,
    );
    let app = init_router(state, session_store);

    serve(app, config.addr, tls).await
}
