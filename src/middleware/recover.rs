//! Panic recovery.
//!
//! A panic inside any handler or inner middleware is caught by
//! `tower_http::catch_panic::CatchPanicLayer`, logged, and answered with a
//! plain 500. The response carries `Connection: close` so the client does not
//! reuse a connection whose request ended abnormally, plus the usual security
//! headers. The log line is written inside the `request` span opened by
//! [`crate::logging::request_context`], which sits outside the catch layer.

use std::any::Any;

use axum::{
    body::Body,
    http::{HeaderValue, Response, StatusCode, header},
};

use crate::middleware::headers::apply_security_headers;

pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = %detail, "handler panicked, connection will be closed");

    let mut response = Response::new(Body::from("Internal Server Error"));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("close"));
    apply_security_headers(headers);

    response
}
