//! # LearnHub Core
//!
//! Core business logic for the email verification token lifecycle.
//! This crate contains domain entities, outcome types, repository interfaces,
//! the verification services and error types. Storage and delivery are
//! provided by implementations of the traits defined here.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
