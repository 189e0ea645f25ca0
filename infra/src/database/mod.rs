//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and health checks
//! - Schema bootstrap for the verification tables
//! - Repository implementations for tokens and users

pub mod connection;
pub mod mysql;
pub mod schema;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlUserRepository, MySqlVerificationTokenRepository};
