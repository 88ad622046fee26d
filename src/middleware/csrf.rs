//! CSRF protection.
//!
//! Every session carries one random token. Safe methods pass through and get
//! the token attached to the request so pages can embed it in their forms.
//! Anything else must echo the token back, either in the `csrf_token` form
//! field or the `X-CSRF-Token` header, or it is rejected with 400 before the
//! handler runs.

use anyhow::anyhow;
use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{Method, request::Parts},
    middleware::Next,
    response::Response,
};
use rand::RngCore;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use snippetbox_core::AppError;
use tower_sessions::Session;

use crate::middleware::session::CSRF_TOKEN;

pub const CSRF_FORM_FIELD: &str = "csrf_token";
pub const CSRF_HEADER_NAME: &str = "x-csrf-token";

/// Largest request body buffered while looking for the form field. Matches
/// axum's default body limit, so anything `Form` would accept gets through.
const MAX_FORM_BYTES: usize = 2 * 1024 * 1024;

/// The session's token, available to handlers as a request extension.
#[derive(Clone, Debug)]
pub struct CsrfToken(pub String);

#[derive(Deserialize)]
struct CsrfField {
    csrf_token: Option<String>,
}

pub fn generate_csrf_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Compares digests so the time taken does not depend on how many leading
/// characters of the guess are right.
pub fn tokens_match(expected: &str, submitted: &str) -> bool {
    Sha256::digest(expected.as_bytes()) == Sha256::digest(submitted.as_bytes())
}

fn is_safe(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

fn header_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(CSRF_HEADER_NAME)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

pub async fn csrf_protect(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let stored = session.get::<String>(CSRF_TOKEN).await?;
    let (mut parts, body) = request.into_parts();

    let body = if is_safe(&parts.method) {
        body
    } else {
        let bytes = to_bytes(body, MAX_FORM_BYTES)
            .await
            .map_err(AppError::bad_request)?;

        let submitted = header_token(&parts).or_else(|| {
            serde_urlencoded::from_bytes::<CsrfField>(&bytes)
                .ok()
                .and_then(|field| field.csrf_token)
        });

        let valid = matches!(
            (&stored, &submitted),
            (Some(expected), Some(got)) if tokens_match(expected, got)
        );
        if !valid {
            tracing::warn!(
                method = %parts.method,
                path = %parts.uri.path(),
                token_present = submitted.is_some(),
                "rejected request with missing or invalid CSRF token"
            );
            return Err(AppError::bad_request(anyhow!("CSRF token missing or invalid")));
        }

        Body::from(bytes)
    };

    let token = match stored {
        Some(token) => token,
        None => {
            let token = generate_csrf_token();
            session.insert(CSRF_TOKEN, &token).await?;
            token
        }
    };
    parts.extensions.insert(CsrfToken(token));

    Ok(next.run(Request::from_parts(parts, body)).await)
}
