//! User accounts and the user store capability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::errors::ModelError;
use crate::ids::UserId;

/// A user account. The password hash never leaves the store.
#[derive(Serialize, FromRow, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created: DateTime<Utc>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates an account, hashing `password` before it is stored.
    ///
    /// Emails are unique ignoring case; a clash yields
    /// [`ModelError::DuplicateEmail`].
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<UserId, ModelError>;

    /// Checks credentials. Unknown email and wrong password both yield
    /// [`ModelError::InvalidCredentials`].
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId, ModelError>;

    async fn exists(&self, id: UserId) -> Result<bool, ModelError>;

    async fn get(&self, id: UserId) -> Result<User, ModelError>;
}
