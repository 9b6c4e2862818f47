//! Companion session cookie.
//!
//! Login and update mirror the session id into a short-lived cookie so
//! browser clients can recover it. The registry never reads this cookie and
//! its expiry does not remove sessions.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::session::SessionId;

/// Default cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "session_tracker.sid";

/// Cookie settings.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Whether the cookie is issued at all.
    pub enabled: bool,
    /// Cookie name.
    pub name: String,
    /// Inactivity lifetime in seconds.
    pub max_age_secs: i64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: DEFAULT_COOKIE_NAME.to_string(),
            max_age_secs: 120,
        }
    }
}

impl CookieConfig {
    /// Create a config that never sets cookies.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Cookie carrying `id`, expiring after the configured inactivity window.
    pub fn session_cookie(&self, id: &SessionId) -> Cookie<'static> {
        Cookie::build((self.name.clone(), id.to_string()))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(Duration::seconds(self.max_age_secs))
            .build()
    }

    /// Removal cookie.
    pub fn clear_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.name.clone(), ""))
            .path("/")
            .max_age(Duration::ZERO)
            .build()
    }

    /// Add (or refresh) the session cookie on `jar`.
    pub fn issue(&self, jar: CookieJar, id: &SessionId) -> CookieJar {
        if self.enabled {
            jar.add(self.session_cookie(id))
        } else {
            jar
        }
    }

    /// Expire the session cookie on `jar`.
    pub fn revoke(&self, jar: CookieJar) -> CookieJar {
        if self.enabled {
            jar.add(self.clear_cookie())
        } else {
            jar
        }
    }
}
