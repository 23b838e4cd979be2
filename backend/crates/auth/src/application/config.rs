//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Upper bound on the token lifetime, one year.
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of a bearer token issued at login
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Short-lived tokens, no pepper
    pub fn development() -> Self {
        Self {
            token_ttl: Duration::from_secs(12 * 3600),
            ..Default::default()
        }
    }

    /// Clamped to [`MAX_TOKEN_TTL_HOURS`].
    pub fn with_token_ttl_hours(mut self, hours: u64) -> Self {
        let secs = hours
            .min(MAX_TOKEN_TTL_HOURS)
            .checked_mul(3600)
            .unwrap_or(MAX_TOKEN_TTL_HOURS * 3600);
        self.token_ttl = Duration::from_secs(secs);
        self
    }

    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        let pepper = pepper.into();
        self.password_pepper = (!pepper.is_empty()).then_some(pepper);
        self
    }

    /// TTL as a chrono duration for timestamp arithmetic
    pub fn token_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.token_ttl).unwrap_or(chrono::Duration::days(7))
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
