use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Body of `POST /api/v1/auth/verify-email`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1, max = 128))]
    pub token: String,
}

/// Query string of the emailed link, `GET /verify-email?token=...`
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEmailQuery {
    #[serde(default)]
    pub token: Option<String>,
}

/// Body of `POST /api/v1/auth/resend-verification`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendVerificationRequest {
    #[validate(custom = "validate_learner_email")]
    pub email: String,
}

// Surrounding whitespace is dropped before the lookup, so it must not fail here either.
fn validate_learner_email(email: &str) -> Result<(), ValidationError> {
    if edu_shared::validation::is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailResponse {
    /// Machine-readable outcome code
    pub outcome: String,
    pub message: String,
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendVerificationResponse {
    pub outcome: String,
    pub message: String,
    /// Earliest moment another resend will be accepted
    pub next_resend_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetAttemptsResponse {
    pub user_id: Uuid,
    pub verification_attempts: i32,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resend_request_validation() {
        let valid = ResendVerificationRequest {
            email: "learner@example.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = ResendVerificationRequest {
            email: "not-an-email".to_string(),
        };
        assert!(invalid.validate().is_err());

        let oversized = ResendVerificationRequest {
            email: format!("{}@example.com", "a".repeat(250)),
        };
        assert!(oversized.validate().is_err());
    }

    #[test]
    fn test_resend_request_accepts_padded_email() {
        let padded = ResendVerificationRequest {
            email: "  Learner@Example.com ".to_string(),
        };
        assert!(padded.validate().is_ok());
    }

    #[test]
    fn test_verify_request_rejects_empty_and_oversized_tokens() {
        let empty = VerifyEmailRequest {
            token: String::new(),
        };
        assert!(empty.validate().is_err());

        let oversized = VerifyEmailRequest {
            token: "a".repeat(129),
        };
        assert!(oversized.validate().is_err());

        let ok = VerifyEmailRequest {
            token: "ab".repeat(32),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_query_token_is_optional() {
        let query: VerifyEmailQuery = serde_json::from_str("{}").unwrap();
        assert!(query.token.is_none());
    }
}
