//! Configuration module with business-specific sub-modules
//!
//! - `cache` - Redis connection used by the resend cooldown
//! - `database` - Database connection and pool configuration
//! - `email` - Outbound email provider
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//! - `verification` - Token lifetime, attempt ceiling and resend cooldown

pub mod cache;
pub mod database;
pub mod email;
pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Verification policy
    pub verification: VerificationConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            verification: VerificationConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Every section reads its own variables; the environment only decides
    /// the logging preset.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            verification: VerificationConfig::from_env(),
            email: EmailConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
