//! Token store trait defining persistence for verification tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_token::VerificationToken;
use crate::errors::DomainError;

/// Repository trait for VerificationToken persistence
///
/// # Consistency
/// `mark_used_if_unused` must be a single compare-and-set at the storage
/// layer. Of any number of concurrent calls for one token, exactly one may
/// return `true`.
#[async_trait]
pub trait VerificationTokenRepository: Send + Sync {
    /// Persist a newly issued token
    ///
    /// # Returns
    /// * `Ok(VerificationToken)` - The stored token
    /// * `Err(DomainError)` - Storage failed or the token value collided
    async fn insert(&self, token: VerificationToken) -> Result<VerificationToken, DomainError>;

    /// Find a token by its value
    ///
    /// # Returns
    /// * `Ok(Some(VerificationToken))` - Token found
    /// * `Ok(None)` - No token matches
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_token(&self, token: &str) -> Result<Option<VerificationToken>, DomainError>;

    /// Atomically set `used = true` where the token is still unused
    ///
    /// # Returns
    /// * `Ok(true)` - This call consumed the token
    /// * `Ok(false)` - Unknown token, or already consumed by someone else
    /// * `Err(DomainError)` - Storage error occurred
    async fn mark_used_if_unused(&self, token: &str) -> Result<bool, DomainError>;

    /// All tokens ever issued to a user, newest first
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<VerificationToken>, DomainError>;

    /// Delete unused tokens that expired before `cutoff`
    ///
    /// Used tokens are kept so a consumed link keeps reporting "already used".
    ///
    /// # Returns
    /// * `Ok(count)` - Number of tokens removed
    async fn delete_unused_expired_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
