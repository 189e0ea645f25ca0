//! Email verification policy configuration

use serde::{Deserialize, Serialize};

/// Verification token lifecycle settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Public base URL used to build `<base>/verify-email?token=...` links
    pub base_url: String,

    /// Token time-to-live in hours
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    /// Verification attempts allowed per user before lockout
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,

    /// Minimum seconds between two resends for the same email
    #[serde(default = "default_resend_cooldown_seconds")]
    pub resend_cooldown_seconds: i64,

    /// How often expired tokens are purged, in seconds
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,

    /// How long expired tokens are kept before purge, in hours
    #[serde(default = "default_cleanup_grace_period_hours")]
    pub cleanup_grace_period_hours: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:3000"),
            token_ttl_hours: default_token_ttl_hours(),
            max_attempts: default_max_attempts(),
            resend_cooldown_seconds: default_resend_cooldown_seconds(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
            cleanup_grace_period_hours: default_cleanup_grace_period_hours(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("APP_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            token_ttl_hours: env_or("VERIFICATION_TOKEN_TTL_HOURS", defaults.token_ttl_hours),
            max_attempts: env_or("VERIFICATION_MAX_ATTEMPTS", defaults.max_attempts),
            resend_cooldown_seconds: env_or(
                "VERIFICATION_RESEND_COOLDOWN_SECONDS",
                defaults.resend_cooldown_seconds,
            ),
            cleanup_interval_seconds: env_or(
                "VERIFICATION_CLEANUP_INTERVAL_SECONDS",
                defaults.cleanup_interval_seconds,
            ),
            cleanup_grace_period_hours: env_or(
                "VERIFICATION_CLEANUP_GRACE_HOURS",
                defaults.cleanup_grace_period_hours,
            ),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_token_ttl_hours() -> i64 {
    48
}

fn default_max_attempts() -> i32 {
    5
}

fn default_resend_cooldown_seconds() -> i64 {
    300 // 5 minutes
}

fn default_cleanup_interval_seconds() -> u64 {
    3600
}

fn default_cleanup_grace_period_hours() -> i64 {
    24 * 7
}
