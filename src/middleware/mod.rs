//! Request interceptors.
//!
//! The pipeline is assembled in [`crate::router`] from two ordered lists, each
//! built with `tower::ServiceBuilder` so the first entry is the outermost:
//!
//! Standard chain, wrapping every request (including 404s and static files):
//!
//! 1. [`recover`]: turn handler panics into a 500 and close the connection
//! 2. [`crate::logging::logging_middleware`]: request log line
//! 3. [`headers`]: fixed security headers
//! 4. request timeout
//!
//! Dynamic chain, wrapping matched application routes only:
//!
//! 1. [`session`]: load the session from its cookie, persist it on the way out
//! 2. [`csrf`]: token check for state-changing methods
//! 3. [`auth::authenticate`]: resolve the session user into the request
//! 4. [`auth::require_authentication`]: protected routes only

pub mod auth;
pub mod csrf;
pub mod headers;
pub mod recover;
pub mod session;
