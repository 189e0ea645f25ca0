//! Resend cooldown entity keyed by email.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Minimum spacing between two resends for one email (5 minutes)
pub const RESEND_COOLDOWN_SECONDS: i64 = 300;

/// Last issuance time for an email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResendCooldown {
    /// Normalized email address
    pub email: String,

    /// When the most recent token was sent
    pub last_sent_at: DateTime<Utc>,

    /// Length of the cooldown window in seconds
    pub window_seconds: i64,
}

impl ResendCooldown {
    pub fn new(email: impl Into<String>, last_sent_at: DateTime<Utc>, window_seconds: i64) -> Self {
        Self {
            email: email.into(),
            last_sent_at,
            window_seconds,
        }
    }

    /// When the next resend becomes possible
    pub fn available_at(&self) -> DateTime<Utc> {
        self.last_sent_at + Duration::seconds(self.window_seconds)
    }

    /// Whether a resend at `now` would be refused
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.available_at()
    }

    /// Whole seconds until the window elapses, rounded up; zero once elapsed
    pub fn retry_after_seconds(&self, now: DateTime<Utc>) -> i64 {
        let remaining = self.available_at() - now;
        if remaining <= Duration::zero() {
            return 0;
        }
        let millis = remaining.num_milliseconds();
        (millis + 999) / 1000
    }
}
