//! Shared utilities and common types for the LearnHub verification server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error codes and response structures
//! - Email validation and masking helpers
//! - Language preference for user-facing messages

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, EmailConfig, Environment, LoggingConfig,
    ServerConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, Language};
pub use utils::validation;
