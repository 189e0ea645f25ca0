//! User profile entity (the verification-relevant subset).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verification attempts allowed before a user is locked out
pub const MAX_VERIFICATION_ATTEMPTS: i32 = 5;

/// User profile as seen by the verification flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Normalized email address
    pub email: String,

    /// Whether the email address has been confirmed
    pub email_verified: bool,

    /// Verification attempts made so far; only an admin reset lowers it
    pub verification_attempts: i32,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates a new unverified user profile
    pub fn new(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: edu_shared::validation::normalize_email(&email.into()),
            email_verified: false,
            verification_attempts: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the attempt ceiling has been reached
    pub fn has_exceeded_attempts(&self, max_attempts: i32) -> bool {
        self.verification_attempts >= max_attempts
    }

    /// Attempts left before lockout
    pub fn remaining_attempts(&self, max_attempts: i32) -> i32 {
        (max_attempts - self.verification_attempts).max(0)
    }

    /// Marks the email address as verified
    pub fn mark_email_verified(&mut self) {
        self.email_verified = true;
        self.updated_at = Utc::now();
    }

    /// Records one verification attempt and returns the new count
    pub fn record_attempt(&mut self) -> i32 {
        self.verification_attempts += 1;
        self.updated_at = Utc::now();
        self.verification_attempts
    }

    /// Clears the attempt counter (admin unlock)
    pub fn reset_attempts(&mut self) {
        self.verification_attempts = 0;
        self.updated_at = Utc::now();
    }
}
