use snippetbox_core::password::PasswordError;
use thiserror::Error;

/// Failures surfaced by the data-store capabilities.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The record does not exist, or (for snippets) has expired.
    #[error("no matching record found")]
    NoRecord,

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("duplicate email")]
    DuplicateEmail,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}
