//! Server-side resend cooldown

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::value_objects::CooldownCheck;
use crate::errors::DomainResult;
use crate::repositories::ResendCooldownStore;

/// Enforces the minimum spacing between resends for one email
pub struct ResendRateLimiter<C: ResendCooldownStore> {
    store: Arc<C>,
    window_seconds: i64,
}

impl<C: ResendCooldownStore> ResendRateLimiter<C> {
    pub fn new(store: Arc<C>, window_seconds: i64) -> Self {
        Self {
            store,
            window_seconds,
        }
    }

    pub fn window_seconds(&self) -> i64 {
        self.window_seconds
    }

    /// Reserve the resend slot for `email` or report how long to wait
    pub async fn check_and_reserve(&self, email: &str, now: DateTime<Utc>) -> DomainResult<CooldownCheck> {
        self.store.try_acquire(email, now, self.window_seconds).await
    }

    /// Give back a reservation that did not end in a send
    pub async fn release(&self, email: &str) -> DomainResult<()> {
        self.store.release(email).await
    }

    /// Start a fresh window at `now` whatever the current state
    pub async fn restart(&self, email: &str, now: DateTime<Utc>) -> DomainResult<()> {
        self.store.release(email).await?;
        self.store.try_acquire(email, now, self.window_seconds).await?;
        Ok(())
    }
}
