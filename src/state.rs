use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use snippetbox_config::Config;
use snippetbox_models::{SnippetRepository, UserRepository};

use crate::middleware::session::SessionSettings;
use crate::templates::Templates;

/// Dependencies shared by every handler and interceptor.
///
/// Built once at startup; everything inside is either immutable or a pool
/// that is safe for concurrent use, so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub snippets: Arc<dyn SnippetRepository>,
    pub users: Arc<dyn UserRepository>,
    pub templates: Arc<Templates>,
    pub static_dir: PathBuf,
    pub session: SessionSettings,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        snippets: Arc<dyn SnippetRepository>,
        users: Arc<dyn UserRepository>,
        templates: Templates,
        config: &Config,
    ) -> Self {
        Self {
            snippets,
            users,
            templates: Arc::new(templates),
            static_dir: config.static_dir(),
            session: SessionSettings {
                lifetime_hours: config.session_lifetime_hours,
                secure: config.secure_cookies,
            },
            request_timeout: config.request_timeout(),
        }
    }
}
