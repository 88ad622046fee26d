//! # Snippetbox
//!
//! A server-rendered snippet sharing site built with Axum, Tera and
//! PostgreSQL. Visitors read snippets; signed-up users can create them.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Interceptors: sessions, CSRF, auth gate, headers, panics
//! ├── modules/          # Feature modules
//! │   ├── snippets/    # Home page, snippet view and creation
//! │   ├── users/       # Signup, login, logout, account page
//! │   └── health/      # Liveness probe and the 404 fallback
//! ├── templates.rs      # Tera view renderer and page data
//! ├── validator.rs      # Form extraction and validation helpers
//! └── utils/           # Response helpers
//! ```
//!
//! Each feature module has a `model.rs` (form types and messages), a
//! `controller.rs` (handlers) and a `router.rs`.
//!
//! ## Request pipeline
//!
//! ```text
//! request span → panic recovery → request logger → security headers → timeout
//!     → router
//!         → session → CSRF → authenticate → (require authentication)
//!             → handler
//! ```
//!
//! ## Authentication
//!
//! Logging in stores the user id in a server-side session and rotates the
//! session id. Every request re-checks that the user still exists; a stale id
//! is dropped and the client continues as anonymous. Protected routes send
//! anonymous clients to `/user/login` and remember where they were going.
//!
//! ## Modules
//!
//! - [`logging`]: request logger and subscriber setup
//! - [`middleware`]: request interceptors
//! - [`modules`]: feature modules
//! - [`router`]: application router
//! - [`server`]: HTTP/HTTPS listener and graceful shutdown
//! - [`state`]: shared application state
//! - [`templates`]: view renderer
//! - [`utils`]: shared helpers
//! - [`validator`]: form extraction and validation

pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod server;
pub mod state;
pub mod templates;
pub mod utils;
pub mod validator;

#[cfg(feature = "test-utils")]
pub mod testing;

// Re-export workspace crates for convenience
pub use snippetbox_config;
pub use snippetbox_core;
pub use snippetbox_db;
pub use snippetbox_models;
