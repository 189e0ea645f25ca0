//! User directory trait used by the verification flow.
//!
//! Account creation and profile management live elsewhere; the verification
//! flow only reads users and updates the two verification fields.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::UserProfile;
use crate::errors::DomainError;

/// Repository trait for the verification-relevant part of a user
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use edu_core::repositories::UserRepository;
/// use edu_core::domain::entities::user::UserProfile;
/// use edu_core::errors::DomainError;
///
/// struct PgUserDirectory {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for PgUserDirectory {
///     async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, DomainError> {
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_email(&self, _: &str) -> Result<Option<UserProfile>, DomainError> { Ok(None) }
/// #   async fn set_email_verified(&self, _: Uuid, _: bool) -> Result<(), DomainError> { Ok(()) }
/// #   async fn increment_verification_attempts(&self, _: Uuid) -> Result<i32, DomainError> { Ok(1) }
/// #   async fn reset_verification_attempts(&self, _: Uuid) -> Result<(), DomainError> { Ok(()) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(UserProfile))` - User found
    /// * `Ok(None)` - No user with that ID
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, DomainError>;

    /// Find a user by normalized email address
    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, DomainError>;

    /// Set the `email_verified` flag
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No user with that ID
    async fn set_email_verified(&self, id: Uuid, verified: bool) -> Result<(), DomainError>;

    /// Atomically add one to `verification_attempts`
    ///
    /// Must not be a read-modify-write in application code; concurrent
    /// callers for one user must never lose an increment.
    ///
    /// # Returns
    /// * `Ok(count)` - The counter value after this increment
    /// * `Err(DomainError::NotFound)` - No user with that ID
    async fn increment_verification_attempts(&self, id: Uuid) -> Result<i32, DomainError>;

    /// Set `verification_attempts` back to zero
    async fn reset_verification_attempts(&self, id: Uuid) -> Result<(), DomainError>;
}
