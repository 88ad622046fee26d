use async_trait::async_trait;
use snippetbox_core::password::{
    DEFAULT_COST, hash_in_background, verify_against_dummy_in_background,
    verify_in_background,
};
use snippetbox_models::{ModelError, User, UserId, UserRepository};
use sqlx::PgPool;
use tracing::instrument;

#[derive(Clone, Debug)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, password))]
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<UserId, ModelError> {
        let hashed_password = hash_in_background(password, DEFAULT_COST).await?;

        let inserted = sqlx::query_scalar::<_, UserId>(
            r#"
            INSERT INTO users (name, email, hashed_password, created)
            VALUES ($1, $2, $3, NOW())
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(&hashed_password)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(id) => Ok(id),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(ModelError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, password))]
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId, ModelError> {
        #[derive(sqlx::FromRow)]
        struct Credentials {
            id: UserId,
            hashed_password: String,
        }

        let row = sqlx::query_as::<_, Credentials>(
            "SELECT id, hashed_password FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            verify_against_dummy_in_background(password).await?;
            return Err(ModelError::InvalidCredentials);
        };

        if verify_in_background(password, &row.hashed_password).await? {
            Ok(row.id)
        } else {
            Err(ModelError::InvalidCredentials)
        }
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: UserId) -> Result<bool, ModelError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT true FROM users WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: UserId) -> Result<User, ModelError> {
        sqlx::query_as::<_, User>("SELECT id, name, email, created FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ModelError::NoRecord)
    }
}
