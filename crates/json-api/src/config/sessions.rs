//! Session Config

use clap::Args;
use jiff::SignedDuration;

/// Session cookie settings.
#[derive(Debug, Clone, Args)]
pub struct SessionConfig {
    /// Name of the session cookie
    #[arg(long, env = "SESSION_COOKIE_NAME", default_value = "portal_session")]
    pub session_cookie_name: String,

    /// Session lifetime in seconds
    #[arg(long, env = "SESSION_TTL_SECONDS", default_value_t = 86_400_u32)]
    pub session_ttl_seconds: u32,

    /// Only send the session cookie over HTTPS
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value_t = false)]
    pub session_cookie_secure: bool,
}

impl SessionConfig {
    /// Session lifetime.
    #[must_use]
    pub fn ttl(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::from(self.session_ttl_seconds))
    }
}
