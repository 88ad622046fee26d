use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// A `302 Found` redirect.
///
/// axum's `Redirect` only offers 303/307/308; browsers treat 302 after a form
/// POST as a GET to the new location, which is what the handlers rely on.
#[derive(Debug, Clone)]
pub struct Found(HeaderValue);

pub fn found(uri: &str) -> Found {
    Found(HeaderValue::try_from(uri).unwrap_or_else(|_| HeaderValue::from_static("/")))
}

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, [(header::LOCATION, self.0)]).into_response()
    }
}
