//! Redis-backed resend cooldown
//!
//! One key per email: `<prefix>:verification:resend:<email>`. The key is
//! created with `SET NX EX`, so Redis both arbitrates concurrent resends
//! and expires the window.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use edu_core::domain::value_objects::CooldownCheck;
use edu_core::errors::DomainError;
use edu_core::repositories::ResendCooldownStore;

use super::{CacheConfig, RedisClient};

/// Cooldown store shared by every API instance
#[derive(Clone)]
pub struct RedisResendCooldownStore {
    redis_client: RedisClient,
}

impl RedisResendCooldownStore {
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    fn cooldown_key(&self, email: &str) -> String {
        cooldown_key(self.redis_client.config(), email)
    }
}

pub(crate) fn cooldown_key(config: &CacheConfig, email: &str) -> String {
    config.key(&["verification", "resend", email])
}

#[async_trait]
impl ResendCooldownStore for RedisResendCooldownStore {
    /// Redis uses its own clock for the window; `now` is only recorded as
    /// the key's value.
    async fn try_acquire(
        &self,
        email: &str,
        now: DateTime<Utc>,
        window_seconds: i64,
    ) -> Result<CooldownCheck, DomainError> {
        let key = self.cooldown_key(email);
        let expiry = window_seconds.max(1) as u64;
        let stamp = now.timestamp().to_string();

        // The key can expire between a failed SET and the TTL read; one
        // more SET settles it.
        for _ in 0..2 {
            if self
                .redis_client
                .set_nx_with_expiry(&key, &stamp, expiry)
                .await?
            {
                return Ok(CooldownCheck::Acquired);
            }

            if let Some(ttl) = self.redis_client.ttl(&key).await? {
                if ttl > 0 {
                    debug!(ttl = ttl, "Resend cooldown active");
                    return Ok(CooldownCheck::Active {
                        retry_after_seconds: ttl,
                    });
                }
            }
        }

        Ok(CooldownCheck::Active {
            retry_after_seconds: 1,
        })
    }

    async fn release(&self, email: &str) -> Result<(), DomainError> {
        self.redis_client.delete(&self.cooldown_key(email)).await?;
        Ok(())
    }
}
