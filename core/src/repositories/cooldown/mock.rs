//! In-memory implementation of ResendCooldownStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::resend_cooldown::ResendCooldown;
use crate::domain::value_objects::CooldownCheck;
use crate::errors::DomainError;

use super::r#trait::ResendCooldownStore;

/// Mock cooldown store keyed by email
pub struct MockResendCooldownStore {
    entries: Arc<Mutex<HashMap<String, ResendCooldown>>>,
}

impl MockResendCooldownStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Current cooldown entry for an email, if any
    pub async fn get(&self, email: &str) -> Option<ResendCooldown> {
        self.entries.lock().await.get(email).cloned()
    }
}

impl Default for MockResendCooldownStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResendCooldownStore for MockResendCooldownStore {
    async fn try_acquire(
        &self,
        email: &str,
        now: DateTime<Utc>,
        window_seconds: i64,
    ) -> Result<CooldownCheck, DomainError> {
        let mut entries = self.entries.lock().await;

        if let Some(existing) = entries.get(email) {
            if existing.is_active_at(now) {
                return Ok(CooldownCheck::Active {
                    retry_after_seconds: existing.retry_after_seconds(now),
                });
            }
        }

        entries.insert(
            email.to_string(),
            ResendCooldown::new(email, now, window_seconds),
        );
        Ok(CooldownCheck::Acquired)
    }

    async fn release(&self, email: &str) -> Result<(), DomainError> {
        self.entries.lock().await.remove(email);
        Ok(())
    }
}
