//! Email verification token entity.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::TokenStatus;

/// Default token lifetime (48 hours)
pub const TOKEN_TTL_HOURS: i64 = 48;

/// Random bytes drawn per token (256 bits)
pub const TOKEN_BYTES: usize = 32;

/// Length of the hex-encoded token
pub const TOKEN_HEX_LENGTH: usize = TOKEN_BYTES * 2;

/// A single-use email verification token
///
/// A user may hold several tokens at once; issuing a new one never
/// invalidates older ones, which simply expire or get consumed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    /// Opaque, unguessable token value
    pub token: String,

    /// Owner of the token
    pub user_id: Uuid,

    /// Timestamp when the token was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the token is no longer accepted
    pub expires_at: DateTime<Utc>,

    /// Set exactly once when the token is consumed
    pub used: bool,
}

impl std::fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationToken")
            .field("token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .field("used", &self.used)
            .finish()
    }
}

impl VerificationToken {
    /// Issue a new token for a user with the default 48 hour lifetime
    pub fn new(user_id: Uuid) -> Self {
        Self::issue(user_id, Utc::now(), Duration::hours(TOKEN_TTL_HOURS))
    }

    /// Issue a new token at `now` valid for `ttl`
    pub fn issue(user_id: Uuid, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token: Self::generate_token(),
            user_id,
            created_at: now,
            expires_at: now + ttl,
            used: false,
        }
    }

    /// Generate a token from the OS CSPRNG
    ///
    /// Returns `TOKEN_BYTES` random bytes as lowercase hex.
    pub fn generate_token() -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Whether a presented string could be a token we issued
    pub fn is_well_formed(token: &str) -> bool {
        token.len() == TOKEN_HEX_LENGTH && token.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Checks whether the token is past its expiry at `now`
    ///
    /// The token is still valid at exactly `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Classify the token at `now`
    ///
    /// A used token reports `AlreadyUsed` even after it has expired.
    pub fn status_at(&self, now: DateTime<Utc>) -> TokenStatus {
        if self.used {
            TokenStatus::AlreadyUsed {
                user_id: self.user_id,
            }
        } else if self.is_expired_at(now) {
            TokenStatus::Expired {
                user_id: self.user_id,
            }
        } else {
            TokenStatus::Valid {
                user_id: self.user_id,
            }
        }
    }

    /// Gets the time remaining until expiration, zero once expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }

    /// Marks the token as consumed
    pub fn mark_as_used(&mut self) {
        self.used = true;
    }
}
