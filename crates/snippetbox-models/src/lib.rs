//! # Snippetbox Models
//!
//! Domain records and the data-store capabilities the web layer depends on.
//!
//! - [`ids`]: `SnippetId` and `UserId` newtypes
//! - [`snippets`]: [`Snippet`] and [`SnippetRepository`]
//! - [`users`]: [`User`] and [`UserRepository`]
//! - [`errors`]: [`ModelError`]
//!
//! The repositories are object-safe so the application can hold them as
//! `Arc<dyn ...>`; the PostgreSQL implementations live in `snippetbox-db`.

pub mod errors;
pub mod ids;
pub mod snippets;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use errors::ModelError;
pub use ids::{SnippetId, UserId};
pub use snippets::{LATEST_LIMIT, PERMITTED_EXPIRY_DAYS, Snippet, SnippetRepository};
pub use users::{User, UserRepository};
