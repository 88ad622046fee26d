use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_snippet, create_snippet_form, home, view_snippet};

pub fn init_snippets_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/snippet/view/{id}", get(view_snippet))
}

/// Routes that need a logged-in user.
pub fn init_protected_snippets_router() -> Router<AppState> {
    Router::new().route(
        "/snippet/create",
        get(create_snippet_form).post(create_snippet),
    )
}
