//! In-memory data stores for tests.
//!
//! They follow the same contracts as the PostgreSQL repositories (expiry
//! filtering, newest-first listing, case-insensitive unique emails) so the
//! full router can be exercised without a database. Passwords are hashed at
//! the lowest bcrypt cost to keep tests fast.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use snippetbox_core::password::{hash_in_background, hash_password_with_cost, verify_in_background};
use snippetbox_models::{
    LATEST_LIMIT, ModelError, Snippet, SnippetId, SnippetRepository, User, UserId,
    UserRepository,
};

const TEST_COST: u32 = 4;

#[derive(Default)]
pub struct MemorySnippetRepository {
    snippets: Mutex<Vec<Snippet>>,
}

impl MemorySnippetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a snippet as-is, for seeding expired or back-dated rows.
    pub fn push(&self, snippet: Snippet) {
        self.lock().push(snippet);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Snippet>> {
        self.snippets.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SnippetRepository for MemorySnippetRepository {
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_in_days: u32,
    ) -> Result<SnippetId, ModelError> {
        let mut snippets = self.lock();
        let id = SnippetId::new(snippets.iter().map(|s| s.id.get()).max().unwrap_or(0) + 1);
        let created = Utc::now();

        snippets.push(Snippet {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created,
            expires: created + Duration::days(i64::from(expires_in_days)),
        });

        Ok(id)
    }

    async fn get(&self, id: SnippetId) -> Result<Snippet, ModelError> {
        let now = Utc::now();
        self.lock()
            .iter()
            .find(|s| s.id == id && s.is_visible_at(now))
            .cloned()
            .ok_or(ModelError::NoRecord)
    }

    async fn latest(&self) -> Result<Vec<Snippet>, ModelError> {
        let now = Utc::now();
        let mut live: Vec<Snippet> = self
            .lock()
            .iter()
            .filter(|s| s.is_visible_at(now))
            .cloned()
            .collect();

        live.sort_by(|a, b| b.id.cmp(&a.id));
        live.truncate(LATEST_LIMIT);
        Ok(live)
    }
}

struct StoredUser {
    user: User,
    hashed_password: String,
}

pub struct MemoryUserRepository {
    users: Mutex<Vec<StoredUser>>,
    dummy_hash: String,
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            dummy_hash: hash_password_with_cost("dummy-password", TEST_COST).unwrap_or_default(),
        }
    }

    /// Deletes an account, as an administrator would behind the app's back.
    pub fn remove(&self, id: UserId) -> bool {
        let mut users = self.lock();
        let before = users.len();
        users.retain(|stored| stored.user.id != id);
        users.len() != before
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StoredUser>> {
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<UserId, ModelError> {
        let hashed_password = hash_in_background(password, TEST_COST).await?;

        let mut users = self.lock();
        if users
            .iter()
            .any(|stored| stored.user.email.eq_ignore_ascii_case(email))
        {
            return Err(ModelError::DuplicateEmail);
        }

        let id = UserId::new(users.iter().map(|s| s.user.id.get()).max().unwrap_or(0) + 1);
        users.push(StoredUser {
            user: User {
                id,
                name: name.to_string(),
                email: email.to_string(),
                created: Utc::now(),
            },
            hashed_password,
        });

        Ok(id)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId, ModelError> {
        let found = self
            .lock()
            .iter()
            .find(|stored| stored.user.email.eq_ignore_ascii_case(email))
            .map(|stored| (stored.user.id, stored.hashed_password.clone()));

        let Some((id, hashed_password)) = found else {
            verify_in_background(password, &self.dummy_hash).await?;
            return Err(ModelError::InvalidCredentials);
        };

        if verify_in_background(password, &hashed_password).await? {
            Ok(id)
        } else {
            Err(ModelError::InvalidCredentials)
        }
    }

    async fn exists(&self, id: UserId) -> Result<bool, ModelError> {
        Ok(self.lock().iter().any(|stored| stored.user.id == id))
    }

    async fn get(&self, id: UserId) -> Result<User, ModelError> {
        self.lock()
            .iter()
            .find(|stored| stored.user.id == id)
            .map(|stored| stored.user.clone())
            .ok_or(ModelError::NoRecord)
    }
}
