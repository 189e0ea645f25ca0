//! Per-user verification attempt ceiling

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::UserProfile;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;

/// Tracks and enforces the verification attempt ceiling
pub struct AttemptLimiter<U: UserRepository> {
    users: Arc<U>,
    max_attempts: i32,
}

impl<U: UserRepository> AttemptLimiter<U> {
    pub fn new(users: Arc<U>, max_attempts: i32) -> Self {
        Self { users, max_attempts }
    }

    pub fn max_attempts(&self) -> i32 {
        self.max_attempts
    }

    /// Whether the user has used up their attempts
    pub async fn check_attempts(&self, user_id: Uuid) -> DomainResult<bool> {
        let user = self.load(user_id).await?;
        Ok(user.has_exceeded_attempts(self.max_attempts))
    }

    /// Record one attempt atomically and return the new count
    pub async fn increment_attempts(&self, user_id: Uuid) -> DomainResult<i32> {
        let count = self.users.increment_verification_attempts(user_id).await?;

        tracing::debug!(
            user_id = %user_id,
            attempts = count,
            max_attempts = self.max_attempts,
            "Recorded verification attempt"
        );

        Ok(count)
    }

    /// Whether a count returned by `increment_attempts` went past the ceiling
    pub fn is_over_ceiling(&self, count: i32) -> bool {
        count > self.max_attempts
    }

    /// Clear the counter; the only way out of a lockout
    pub async fn reset_attempts(&self, user_id: Uuid) -> DomainResult<()> {
        self.load(user_id).await?;
        self.users.reset_verification_attempts(user_id).await
    }

    async fn load(&self, user_id: Uuid) -> DomainResult<UserProfile> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "User".to_string(),
            })
    }
}
