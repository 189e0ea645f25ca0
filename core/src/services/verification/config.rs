//! Configuration for the verification service

use chrono::Duration;
use edu_shared::VerificationConfig;

use crate::domain::entities::{MAX_VERIFICATION_ATTEMPTS, RESEND_COOLDOWN_SECONDS, TOKEN_TTL_HOURS};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Public base URL the verification link is built on
    pub base_url: String,
    /// Hours a token stays valid after issuance
    pub token_ttl_hours: i64,
    /// Verification attempts allowed per user
    pub max_attempts: i32,
    /// Minimum seconds between resends for one email
    pub resend_cooldown_seconds: i64,
}

impl VerificationServiceConfig {
    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.token_ttl_hours)
    }
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:3000"),
            token_ttl_hours: TOKEN_TTL_HOURS,
            max_attempts: MAX_VERIFICATION_ATTEMPTS,
            resend_cooldown_seconds: RESEND_COOLDOWN_SECONDS,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_ttl_hours: config.token_ttl_hours,
            max_attempts: config.max_attempts,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
        }
    }
}
