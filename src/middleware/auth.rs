//! Authentication gate.
//!
//! [`authenticate`] runs on every dynamic route: it resolves the session's
//! `authenticated_user_id` against the user store and, when the account still
//! exists, attaches [`AuthenticatedUser`] to the request. It never blocks.
//! A stale id (account deleted since login) is dropped from the session, which
//! demotes the client to anonymous.
//!
//! [`require_authentication`] is layered only on routes that need a logged-in
//! user and redirects everyone else to the login page.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, Method, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use snippetbox_core::AppError;
use snippetbox_models::UserId;
use tower_sessions::Session;

use crate::middleware::session::{AUTHENTICATED_USER_ID, REDIRECT_AFTER_LOGIN};
use crate::state::AppState;
use crate::utils::redirect::found;

pub const LOGIN_PATH: &str = "/user/login";

/// Validated identity of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| found(LOGIN_PATH).into_response())
    }
}

pub async fn authenticate(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user_id) = session.get::<UserId>(AUTHENTICATED_USER_ID).await? else {
        return Ok(next.run(request).await);
    };

    if state.users.exists(user_id).await? {
        request.extensions_mut().insert(AuthenticatedUser(user_id));
    } else {
        tracing::info!(%user_id, "session refers to a missing user, demoting to anonymous");
        session.remove::<UserId>(AUTHENTICATED_USER_ID).await?;
    }

    Ok(next.run(request).await)
}

pub async fn require_authentication(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if request.extensions().get::<AuthenticatedUser>().is_none() {
        if request.method() == Method::GET {
            session
                .insert(REDIRECT_AFTER_LOGIN, request.uri().path())
                .await?;
        }
        return Ok(found(LOGIN_PATH).into_response());
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    Ok(response)
}
