//! Application Configuration
//!
//! Configuration for the fleet application layer.

use platform::cookie::CookieConfig;
use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Fleet application configuration
#[derive(Debug, Clone)]
pub struct FleetConfig {
    /// Cookie name for flash messages
    pub flash_cookie_name: String,
    /// How long an unread flash survives
    pub flash_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Rentals shown on the dashboard
    pub recent_rentals_limit: i64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            flash_cookie_name: "flash".to_string(),
            flash_ttl: Duration::from_secs(60),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            recent_rentals_limit: 6,
        }
    }
}

impl FleetConfig {
    /// Create config for development (insecure cookie, plain http)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Cookie settings for the flash cookie
    pub fn flash_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.flash_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.flash_ttl.as_secs() as i64),
        }
    }
}
