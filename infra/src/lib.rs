//! # Infrastructure Layer
//!
//! Concrete implementations of the storage and delivery traits defined in
//! `edu_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL token store and user directory using SQLx
//! - **Cache**: Redis client and the authoritative resend cooldown
//! - **Email**: Brevo transactional email and a mock for development
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

use edu_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and cooldown store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Email module - outbound verification emails
pub mod email;

/// Configuration types consumed by this crate
pub mod config {
    pub use edu_shared::config::{CacheConfig, DatabaseConfig, EmailConfig};
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email provider error
    #[error("Email service error: {0}")]
    Email(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Email(message) => DomainError::Delivery { message },
            InfrastructureError::Config(message) => DomainError::Internal { message },
            other => DomainError::storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_mapping() {
        let delivery: DomainError = InfrastructureError::Email("rejected".into()).into();
        assert!(matches!(delivery, DomainError::Delivery { .. }));

        let storage: DomainError = InfrastructureError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(storage, DomainError::Storage { .. }));
        assert!(storage.is_infrastructure());
    }
}
