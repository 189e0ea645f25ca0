//! Token issuance

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::verification_token::VerificationToken;
use crate::errors::DomainResult;
use crate::repositories::VerificationTokenRepository;

/// Creates and persists fresh verification tokens
pub struct TokenIssuer<T: VerificationTokenRepository> {
    tokens: Arc<T>,
    ttl: Duration,
}

impl<T: VerificationTokenRepository> TokenIssuer<T> {
    pub fn new(tokens: Arc<T>, ttl: Duration) -> Self {
        Self { tokens, ttl }
    }

    /// Issue a new token for a user, valid for the configured lifetime
    ///
    /// Earlier unexpired tokens for the same user stay valid.
    pub async fn issue_token(&self, user_id: Uuid) -> DomainResult<VerificationToken> {
        self.issue_token_at(user_id, Utc::now()).await
    }

    /// Issue a token as if the current time were `now`
    pub async fn issue_token_at(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<VerificationToken> {
        let token = VerificationToken::issue(user_id, now, self.ttl);
        let stored = self.tokens.insert(token).await?;

        tracing::info!(
            user_id = %user_id,
            expires_at = %stored.expires_at,
            event = "verification_token_issued",
            "Issued email verification token"
        );

        Ok(stored)
    }
}
