//! Password hashing.
//!
//! Raw passwords only ever pass through this module on their way to bcrypt.
//! Request handling goes through the `*_in_background` variants, which run
//! bcrypt on tokio's blocking pool instead of a runtime worker.

use std::sync::LazyLock;

use bcrypt::{BcryptError, hash, verify};
use thiserror::Error;
use tokio::task::{JoinError, spawn_blocking};

pub use bcrypt::DEFAULT_COST;

/// Hash used to keep login timing flat when the email is unknown.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash("snippetbox-dummy-password", DEFAULT_COST).unwrap_or_default());

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error(transparent)]
    Bcrypt(#[from] BcryptError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] JoinError),
}

pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Same as [`hash_password`] with an explicit work factor (4..=31).
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    verify(password, hash)
}

/// Burns one bcrypt verification without a stored hash. Always `false`.
pub fn verify_against_dummy(password: &str) -> bool {
    let _ = verify(password, DUMMY_HASH.as_str());
    false
}

pub async fn hash_in_background(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_owned();
    Ok(spawn_blocking(move || hash_password_with_cost(&password, cost)).await??)
}

pub async fn verify_in_background(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    Ok(spawn_blocking(move || verify_password(&password, &hash)).await??)
}

pub async fn verify_against_dummy_in_background(password: &str) -> Result<bool, PasswordError> {
    let password = password.to_owned();
    Ok(spawn_blocking(move || verify_against_dummy(&password)).await?)
}
