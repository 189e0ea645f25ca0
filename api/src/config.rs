//! Startup configuration
//!
//! Wraps the shared `AppConfig` with the checks the server runs before it
//! binds a socket.

use edu_shared::config::{AppConfig, EmailConfig};
use thiserror::Error;

/// Minimum length accepted for `ADMIN_API_KEY`
pub const MIN_ADMIN_KEY_LENGTH: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("APP_BASE_URL must use https in production, got {0}")]
    InsecureBaseUrl(String),

    #[error("EMAIL_PROVIDER must not be 'mock' in production")]
    MockEmailInProduction,

    #[error("EMAIL_PROVIDER '{0}' is not supported in production")]
    UnknownEmailProvider(String),

    #[error("{name} is required by the {provider} email provider")]
    IncompleteEmailProvider {
        provider: &'static str,
        name: &'static str,
    },

    #[error("ADMIN_API_KEY must be at least 32 characters")]
    WeakAdminKey,

    #[error("{name} must be positive")]
    NonPositive { name: &'static str },
}

/// Load `.env` (if present) and read the configuration from the environment
pub fn load() -> AppConfig {
    dotenvy::dotenv().ok();
    AppConfig::from_env()
}

/// Reject configurations that would run an unsafe or broken server
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let verification = &config.verification;
    if verification.token_ttl_hours <= 0 {
        return Err(ConfigError::NonPositive {
            name: "VERIFICATION_TOKEN_TTL_HOURS",
        });
    }
    if verification.max_attempts <= 0 {
        return Err(ConfigError::NonPositive {
            name: "VERIFICATION_MAX_ATTEMPTS",
        });
    }
    if verification.resend_cooldown_seconds <= 0 {
        return Err(ConfigError::NonPositive {
            name: "VERIFICATION_RESEND_COOLDOWN_SECONDS",
        });
    }

    if let Some(key) = &config.server.admin_api_key {
        if key.len() < MIN_ADMIN_KEY_LENGTH {
            return Err(ConfigError::WeakAdminKey);
        }
    }

    if config.is_production() {
        if !verification.base_url.starts_with("https://") {
            return Err(ConfigError::InsecureBaseUrl(verification.base_url.clone()));
        }
        validate_email_provider(&config.email)?;
    }

    Ok(())
}

// Outside production an unusable provider falls back to the mock mailer;
// in production that would accept resends without delivering anything.
fn validate_email_provider(email: &EmailConfig) -> Result<(), ConfigError> {
    match email.provider.as_str() {
        "brevo" => {
            if email.api_key.trim().is_empty() {
                return Err(ConfigError::IncompleteEmailProvider {
                    provider: "brevo",
                    name: "BREVO_API_KEY",
                });
            }
            if email.sender_address.trim().is_empty() {
                return Err(ConfigError::IncompleteEmailProvider {
                    provider: "brevo",
                    name: "EMAIL_SENDER_ADDRESS",
                });
            }
            Ok(())
        }
        "mock" => Err(ConfigError::MockEmailInProduction),
        other => Err(ConfigError::UnknownEmailProvider(other.to_string())),
    }
}
