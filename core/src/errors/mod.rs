//! Domain error types and error handling.

use thiserror::Error;

/// Core domain errors
///
/// Lifecycle states such as an expired token are not errors; they are
/// returned as outcome values. This enum only carries genuine failures.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Email delivery failed: {message}")]
    Delivery { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Build a storage error from any displayable source
    pub fn storage(message: impl std::fmt::Display) -> Self {
        DomainError::Storage {
            message: message.to_string(),
        }
    }

    /// Whether this error comes from a collaborator rather than the caller
    ///
    /// These all map to the same generic "try again later" message.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            DomainError::Storage { .. } | DomainError::Delivery { .. } | DomainError::Internal { .. }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_classification() {
        assert!(DomainError::storage("connection reset").is_infrastructure());
        assert!(DomainError::Delivery { message: "503".into() }.is_infrastructure());
        assert!(!DomainError::Validation { message: "bad email".into() }.is_infrastructure());
        assert!(!DomainError::NotFound { resource: "User".into() }.is_infrastructure());
    }

    #[test]
    fn test_display() {
        let err = DomainError::storage("deadlock found");
        assert_eq!(err.to_string(), "Storage error: deadlock found");
    }
}
