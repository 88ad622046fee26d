use std::time::Duration;

use axum::{Router, http::StatusCode, middleware, routing::get};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, timeout::TimeoutLayer};
use tower_sessions::SessionStore;

use crate::logging::{logging_middleware, request_context};
use crate::middleware::auth::{authenticate, require_authentication};
use crate::middleware::csrf::csrf_protect;
use crate::middleware::headers::security_headers;
use crate::middleware::recover::panic_response;
use crate::middleware::session::session_layer;
use crate::modules::health::{not_found, ping};
use crate::modules::snippets::{init_protected_snippets_router, init_snippets_router};
use crate::modules::users::{init_protected_users_router, init_users_router};
use crate::state::AppState;

/// Builds the whole application.
///
/// Application routes sit behind the dynamic chain (session, CSRF,
/// authenticate) and the protected ones additionally behind
/// `require_authentication`. Both are attached with `route_layer`, so
/// unmatched paths never create a session. `/ping` and `/static` skip the
/// dynamic chain entirely. Everything is wrapped in the standard chain.
pub fn init_router<Store>(state: AppState, store: Store) -> Router
where
    Store: SessionStore + Clone,
{
    let protected = init_protected_snippets_router()
        .merge(init_protected_users_router())
        .route_layer(middleware::from_fn(require_authentication));

    let dynamic = init_snippets_router()
        .merge(init_users_router())
        .merge(protected)
        .route_layer(
            ServiceBuilder::new()
                .layer(session_layer(store, &state.session))
                .layer(middleware::from_fn(csrf_protect))
                .layer(middleware::from_fn_with_state(state.clone(), authenticate)),
        );

    let static_files =
        ServeDir::new(&state.static_dir).append_index_html_on_directories(false);

    let router = Router::new()
        .route("/ping", get(ping))
        .nest_service("/static", static_files)
        .merge(dynamic)
        .fallback(not_found)
        .with_state(state.clone());

    with_standard_middleware(router, state.request_timeout)
}

/// Panic recovery, request logging, security headers and the request
/// timeout, outermost first. The request span wraps all of them so a
/// recovered panic is logged with the request it came from.
pub fn with_standard_middleware(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(request_context))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(middleware::from_fn(logging_middleware))
            .layer(middleware::from_fn(security_headers))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                timeout,
            )),
    )
}
