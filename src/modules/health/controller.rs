use anyhow::anyhow;
use axum::http::Uri;
use snippetbox_core::AppError;

/// Liveness probe. Answers without touching sessions or the database.
pub async fn ping() -> &'static str {
    "OK"
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(anyhow!("no route for {}", uri.path()))
}
