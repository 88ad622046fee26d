use async_trait::async_trait;
use snippetbox_models::{LATEST_LIMIT, ModelError, Snippet, SnippetId, SnippetRepository};
use sqlx::PgPool;
use tracing::instrument;

#[derive(Clone, Debug)]
pub struct PgSnippetRepository {
    pool: PgPool,
}

impl PgSnippetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnippetRepository for PgSnippetRepository {
    #[instrument(skip(self, content))]
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_in_days: u32,
    ) -> Result<SnippetId, ModelError> {
        let days = i32::try_from(expires_in_days).unwrap_or(i32::MAX);

        let id = sqlx::query_scalar::<_, SnippetId>(
            r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES ($1, $2, NOW(), NOW() + make_interval(days => $3))
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(days)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: SnippetId) -> Result<Snippet, ModelError> {
        sqlx::query_as::<_, Snippet>(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > NOW() AND id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ModelError::NoRecord)
    }

    #[instrument(skip(self))]
    async fn latest(&self) -> Result<Vec<Snippet>, ModelError> {
        let snippets = sqlx::query_as::<_, Snippet>(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > NOW()
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(LATEST_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(snippets)
    }
}
