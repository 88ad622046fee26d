//! Snippet records and the snippet store capability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::errors::ModelError;
use crate::ids::SnippetId;

/// How long a new snippet stays visible, in days.
pub const PERMITTED_EXPIRY_DAYS: [u32; 3] = [1, 7, 365];

/// Number of snippets shown on the home page.
pub const LATEST_LIMIT: usize = 10;

#[derive(Serialize, FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl Snippet {
    /// A snippet is public only while `now < expires`.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires
    }
}

/// Durable snippet storage.
///
/// Implementations must never return expired snippets from [`get`](Self::get)
/// or [`latest`](Self::latest).
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Stores a snippet expiring `expires_in_days` after now and returns its id.
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_in_days: u32,
    ) -> Result<SnippetId, ModelError>;

    /// Fetches a live snippet; [`ModelError::NoRecord`] if missing or expired.
    async fn get(&self, id: SnippetId) -> Result<Snippet, ModelError>;

    /// Up to [`LATEST_LIMIT`] live snippets, newest first.
    async fn latest(&self) -> Result<Vec<Snippet>, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_visibility_boundary() {
        let created = Utc::now();
        let snippet = Snippet {
            id: SnippetId::new(1),
            title: "t".into(),
            content: "c".into(),
            created,
            expires: created + Duration::days(1),
        };

        assert!(snippet.is_visible_at(created));
        assert!(!snippet.is_visible_at(snippet.expires));
        assert!(!snippet.is_visible_at(snippet.expires + Duration::seconds(1)));
    }
}
