//! Session load/save layer and the keys stored in a session.
//!
//! Sessions are handled by `tower-sessions`: the layer resolves the `session`
//! cookie (issuing a fresh id when it is missing or unknown), loads the record
//! lazily from the configured [`SessionStore`] and persists any mutation when
//! the response is flushed. Swapping the backing store only means passing a
//! different store to [`session_layer`].

use time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore, cookie::SameSite};

pub const SESSION_COOKIE: &str = "session";

/// `UserId` of the logged-in account.
pub const AUTHENTICATED_USER_ID: &str = "authenticated_user_id";
/// One-shot message shown on the next rendered page.
pub const FLASH: &str = "flash";
/// Path to resume after a login forced by `require_authentication`.
pub const REDIRECT_AFTER_LOGIN: &str = "redirect_after_login";
pub const CSRF_TOKEN: &str = "csrf_token";

#[derive(Clone, Debug)]
pub struct SessionSettings {
    pub lifetime_hours: u32,
    pub secure: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            lifetime_hours: 12,
            secure: true,
        }
    }
}

pub fn session_layer<Store>(store: Store, settings: &SessionSettings) -> SessionManagerLayer<Store>
where
    Store: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE)
        .with_path("/")
        .with_http_only(true)
        .with_secure(settings.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::hours(i64::from(settings.lifetime_hours))))
}
