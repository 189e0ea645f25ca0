//! Server-side resend cooldown store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::value_objects::CooldownCheck;
use crate::errors::DomainError;

/// Authoritative per-email cooldown
///
/// `try_acquire` must be an atomic set-if-absent: two concurrent callers
/// for the same email cannot both receive `Acquired`.
#[async_trait]
pub trait ResendCooldownStore: Send + Sync {
    /// Reserve the resend slot for `email` for `window_seconds`
    ///
    /// # Arguments
    /// * `email` - Normalized email address
    /// * `now` - Reservation time; stores with their own clock may ignore it
    /// * `window_seconds` - Cooldown length
    ///
    /// # Returns
    /// * `Ok(CooldownCheck::Acquired)` - No active cooldown; one starts now
    /// * `Ok(CooldownCheck::Active { .. })` - Seconds until a resend is allowed
    async fn try_acquire(
        &self,
        email: &str,
        now: DateTime<Utc>,
        window_seconds: i64,
    ) -> Result<CooldownCheck, DomainError>;

    /// Drop a reservation that did not lead to a delivered token
    async fn release(&self, email: &str) -> Result<(), DomainError>;
}
