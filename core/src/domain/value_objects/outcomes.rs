//! Discriminated results of the verification state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of a presented token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TokenStatus {
    /// No record matches the token
    NotFound,
    /// Record found, unused, past its expiry
    Expired { user_id: Uuid },
    /// Record found and already consumed, whatever its expiry
    AlreadyUsed { user_id: Uuid },
    /// Record found, unused and within its lifetime
    Valid { user_id: Uuid },
}

impl TokenStatus {
    /// Owner of the token when a record was found
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            TokenStatus::NotFound => None,
            TokenStatus::Expired { user_id }
            | TokenStatus::AlreadyUsed { user_id }
            | TokenStatus::Valid { user_id } => Some(*user_id),
        }
    }
}

/// Terminal outcome of the "verify my email" flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerifyEmailOutcome {
    /// Token consumed and email marked verified
    Success { user_id: Uuid },
    /// Unknown token; the user needs a new link
    Invalid,
    /// Token outlived its lifetime; a resend is offered
    Expired { user_id: Uuid },
    /// Token consumed earlier but the email is still unverified
    AlreadyUsed { user_id: Uuid },
    /// Token consumed earlier and the email is verified; informational
    AlreadyVerified { user_id: Uuid },
    /// Attempt ceiling reached; no further resend until an admin reset
    ExceededAttempts { user_id: Uuid },
    /// A concurrent request consumed the token first
    Error { user_id: Uuid },
}

impl VerifyEmailOutcome {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            VerifyEmailOutcome::Success { .. } => "success",
            VerifyEmailOutcome::Invalid => "invalid",
            VerifyEmailOutcome::Expired { .. } => "expired",
            VerifyEmailOutcome::AlreadyUsed { .. } => "already_used",
            VerifyEmailOutcome::AlreadyVerified { .. } => "already_verified",
            VerifyEmailOutcome::ExceededAttempts { .. } => "exceeded_attempts",
            VerifyEmailOutcome::Error { .. } => "error",
        }
    }

    /// Whether the user should be offered a new link
    pub fn offers_resend(&self) -> bool {
        matches!(
            self,
            VerifyEmailOutcome::Invalid
                | VerifyEmailOutcome::Expired { .. }
                | VerifyEmailOutcome::AlreadyUsed { .. }
        )
    }

    /// Whether the user's email ends up verified
    pub fn is_verified(&self) -> bool {
        matches!(
            self,
            VerifyEmailOutcome::Success { .. } | VerifyEmailOutcome::AlreadyVerified { .. }
        )
    }
}

/// Terminal outcome of the "resend verification" flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResendOutcome {
    /// A new link was delivered
    Sent { next_resend_at: DateTime<Utc> },
    /// Cooldown still running for this email
    RateLimited { retry_after_seconds: i64 },
    /// No user owns this email
    NotFound,
    /// Nothing to do; the email is already verified
    AlreadyVerified,
    /// The user is locked out of verification
    ExceededAttempts,
}

impl ResendOutcome {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ResendOutcome::Sent { .. } => "sent",
            ResendOutcome::RateLimited { .. } => "rate_limited",
            ResendOutcome::NotFound => "not_found",
            ResendOutcome::AlreadyVerified => "already_verified",
            ResendOutcome::ExceededAttempts => "exceeded_attempts",
        }
    }
}

/// Result of reserving a resend slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownCheck {
    /// The slot is ours; the cooldown window starts now
    Acquired,
    /// Another send happened recently
    Active { retry_after_seconds: i64 },
}
