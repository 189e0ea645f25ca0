//! Periodic purge of expired verification tokens

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::VerificationTokenRepository;

/// Configuration for token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// How long an expired token is kept before deletion (in hours)
    pub grace_period_hours: i64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            grace_period_hours: 168,
            enabled: true,
        }
    }
}

impl From<&edu_shared::VerificationConfig> for TokenCleanupConfig {
    fn from(config: &edu_shared::VerificationConfig) -> Self {
        Self {
            interval_seconds: config.cleanup_interval_seconds,
            grace_period_hours: config.cleanup_grace_period_hours,
            enabled: config.cleanup_interval_seconds > 0,
        }
    }
}

/// Service for deleting long-expired verification tokens
pub struct TokenCleanupService<R: VerificationTokenRepository + 'static> {
    repository: Arc<R>,
    config: TokenCleanupConfig,
}

impl<R: VerificationTokenRepository> TokenCleanupService<R> {
    /// Create a new token cleanup service
    pub fn new(repository: Arc<R>, config: TokenCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle
    ///
    /// Deletes tokens whose expiry lies further in the past than the grace
    /// period. Used tokens are never deleted.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let cutoff = Utc::now() - Duration::hours(self.config.grace_period_hours);
        let deleted = self.repository.delete_unused_expired_before(cutoff).await?;

        info!(
            deleted = deleted,
            cutoff = %cutoff,
            event = "verification_token_cleanup",
            "Deleted expired verification tokens"
        );

        Ok(CleanupResult {
            expired_tokens_deleted: deleted,
        })
    }

    /// Start the cleanup service as a background task
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Token cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!("Token cleanup cycle failed: {}", e);
                }
            }
        });
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired tokens deleted
    pub expired_tokens_deleted: u64,
}
