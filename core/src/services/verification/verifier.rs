//! Token classification and consumption

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::entities::verification_token::VerificationToken;
use crate::domain::value_objects::TokenStatus;
use crate::errors::DomainResult;
use crate::repositories::VerificationTokenRepository;

/// Classifies presented tokens and consumes valid ones
pub struct TokenVerifier<T: VerificationTokenRepository> {
    tokens: Arc<T>,
}

impl<T: VerificationTokenRepository> TokenVerifier<T> {
    pub fn new(tokens: Arc<T>) -> Self {
        Self { tokens }
    }

    /// Classify a token against the current time. Read-only.
    pub async fn verify_token(&self, token: &str) -> DomainResult<TokenStatus> {
        self.verify_token_at(token, Utc::now()).await
    }

    /// Classify a token as of `now`
    ///
    /// A used token reports `AlreadyUsed` even past its expiry.
    pub async fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> DomainResult<TokenStatus> {
        if !VerificationToken::is_well_formed(token) {
            tracing::debug!(event = "malformed_token", "Rejected malformed verification token");
            return Ok(TokenStatus::NotFound);
        }

        let status = match self.tokens.find_by_token(token).await? {
            Some(record) => record.status_at(now),
            None => TokenStatus::NotFound,
        };

        Ok(status)
    }

    /// Mark a token used if nobody else has
    ///
    /// Returns `false` when a concurrent request consumed it first. At most
    /// one caller ever gets `true` for a given token.
    pub async fn consume_token(&self, token: &str) -> DomainResult<bool> {
        let consumed = self.tokens.mark_used_if_unused(token).await?;

        if !consumed {
            tracing::warn!(
                event = "token_consumption_race_lost",
                "Verification token was consumed by a concurrent request"
            );
        }

        Ok(consumed)
    }
}
