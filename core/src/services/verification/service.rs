//! Verification orchestrator

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use edu_shared::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::user::UserProfile;
use crate::domain::entities::verification_token::VerificationToken;
use crate::domain::value_objects::{CooldownCheck, ResendOutcome, TokenStatus, VerifyEmailOutcome};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ResendCooldownStore, UserRepository, VerificationTokenRepository};

use super::attempts::AttemptLimiter;
use super::config::VerificationServiceConfig;
use super::issuer::TokenIssuer;
use super::resend_limiter::ResendRateLimiter;
use super::traits::EmailDeliveryTrait;
use super::verifier::TokenVerifier;

/// Email verification service
///
/// Every collaborator is injected, so one instance can be shared across
/// request handlers for the lifetime of the process.
pub struct EmailVerificationService<T, U, C, E>
where
    T: VerificationTokenRepository,
    U: UserRepository,
    C: ResendCooldownStore,
    E: EmailDeliveryTrait,
{
    issuer: TokenIssuer<T>,
    verifier: TokenVerifier<T>,
    attempts: AttemptLimiter<U>,
    limiter: ResendRateLimiter<C>,
    users: Arc<U>,
    email_service: Arc<E>,
    config: VerificationServiceConfig,
}

impl<T, U, C, E> EmailVerificationService<T, U, C, E>
where
    T: VerificationTokenRepository,
    U: UserRepository,
    C: ResendCooldownStore,
    E: EmailDeliveryTrait,
{
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `tokens` - Token store
    /// * `users` - User directory
    /// * `cooldowns` - Resend cooldown store
    /// * `email_service` - Outbound email channel
    /// * `config` - Lifetimes and limits
    pub fn new(
        tokens: Arc<T>,
        users: Arc<U>,
        cooldowns: Arc<C>,
        email_service: Arc<E>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            issuer: TokenIssuer::new(tokens.clone(), config.token_ttl()),
            verifier: TokenVerifier::new(tokens),
            attempts: AttemptLimiter::new(users.clone(), config.max_attempts),
            limiter: ResendRateLimiter::new(cooldowns, config.resend_cooldown_seconds),
            users,
            email_service,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    pub fn issuer(&self) -> &TokenIssuer<T> {
        &self.issuer
    }

    pub fn verifier(&self) -> &TokenVerifier<T> {
        &self.verifier
    }

    pub fn attempts(&self) -> &AttemptLimiter<U> {
        &self.attempts
    }

    /// Link sent to the user: `<base_url>/verify-email?token=<token>`
    pub fn verification_url(&self, token: &str) -> String {
        format!(
            "{}/verify-email?token={}",
            self.config.base_url.trim_end_matches('/'),
            token
        )
    }

    /// Run the "verify my email" flow for a presented token
    pub async fn verify_email(&self, token: &str) -> DomainResult<VerifyEmailOutcome> {
        self.verify_email_at(token, Utc::now()).await
    }

    /// Run the verification flow as of `now`
    ///
    /// Steps run strictly in order:
    /// 1. Classify the token
    /// 2. Unknown, expired and used tokens end here
    /// 3. For a valid token, enforce the attempt ceiling
    /// 4. Count the attempt
    /// 5. Consume the token; losing the race ends with `Error`
    /// 6. Mark the email verified
    pub async fn verify_email_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<VerifyEmailOutcome> {
        let status = self.verifier.verify_token_at(token, now).await?;

        let outcome = match status {
            TokenStatus::NotFound => VerifyEmailOutcome::Invalid,
            TokenStatus::Expired { user_id } => VerifyEmailOutcome::Expired { user_id },
            TokenStatus::AlreadyUsed { user_id } => {
                let user = self.load_user(user_id).await?;
                if user.email_verified {
                    VerifyEmailOutcome::AlreadyVerified { user_id }
                } else {
                    VerifyEmailOutcome::AlreadyUsed { user_id }
                }
            }
            TokenStatus::Valid { user_id } => self.consume_valid(token, user_id).await?,
        };

        tracing::info!(
            user_id = ?outcome_user(&outcome),
            outcome = outcome.code(),
            event = "email_verification_attempt",
            "Email verification finished"
        );

        Ok(outcome)
    }

    async fn consume_valid(&self, token: &str, user_id: Uuid) -> DomainResult<VerifyEmailOutcome> {
        if self.attempts.check_attempts(user_id).await? {
            tracing::warn!(
                user_id = %user_id,
                event = "verification_attempts_exceeded",
                "Verification refused: attempt ceiling reached"
            );
            return Ok(VerifyEmailOutcome::ExceededAttempts { user_id });
        }

        // A concurrent request may have taken the last attempt after the check
        let count = self.attempts.increment_attempts(user_id).await?;
        if self.attempts.is_over_ceiling(count) {
            tracing::warn!(
                user_id = %user_id,
                attempts = count,
                event = "verification_attempts_exceeded",
                "Verification refused: attempt ceiling reached concurrently"
            );
            return Ok(VerifyEmailOutcome::ExceededAttempts { user_id });
        }

        if !self.verifier.consume_token(token).await? {
            return Ok(VerifyEmailOutcome::Error { user_id });
        }

        self.users.set_email_verified(user_id, true).await?;

        tracing::info!(
            user_id = %user_id,
            event = "email_verified",
            "Email address verified"
        );

        Ok(VerifyEmailOutcome::Success { user_id })
    }

    /// Run the resend flow for an email address
    pub async fn resend_verification(&self, email: &str) -> DomainResult<ResendOutcome> {
        self.resend_verification_at(email, Utc::now()).await
    }

    /// Run the resend flow as of `now`
    ///
    /// The cooldown slot is reserved before anything else. If no token is
    /// delivered the reservation is handed back, so only a successful send
    /// starts a cooldown window.
    pub async fn resend_verification_at(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<ResendOutcome> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::Validation {
                message: "Invalid email address".to_string(),
            });
        }

        if let CooldownCheck::Active {
            retry_after_seconds,
        } = self.limiter.check_and_reserve(&email, now).await?
        {
            tracing::info!(
                email = %mask_email(&email),
                retry_after_seconds = retry_after_seconds,
                event = "resend_rate_limited",
                "Verification resend refused by cooldown"
            );
            return Ok(ResendOutcome::RateLimited {
                retry_after_seconds,
            });
        }

        let result = self.resend_reserved(&email, now).await;

        if !matches!(result, Ok(ResendOutcome::Sent { .. })) {
            if let Err(e) = self.limiter.release(&email).await {
                tracing::warn!(
                    email = %mask_email(&email),
                    error = %e,
                    "Failed to release resend cooldown reservation"
                );
            }
        }

        if let Ok(outcome) = &result {
            tracing::info!(
                email = %mask_email(&email),
                outcome = outcome.code(),
                event = "verification_resend",
                "Verification resend finished"
            );
        }

        result
    }

    async fn resend_reserved(&self, email: &str, now: DateTime<Utc>) -> DomainResult<ResendOutcome> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => return Ok(ResendOutcome::NotFound),
        };

        if user.email_verified {
            return Ok(ResendOutcome::AlreadyVerified);
        }

        if self.attempts.check_attempts(user.id).await? {
            return Ok(ResendOutcome::ExceededAttempts);
        }

        self.issue_and_deliver(&user, now).await?;

        Ok(ResendOutcome::Sent {
            next_resend_at: now + Duration::seconds(self.limiter.window_seconds()),
        })
    }

    /// Issue and deliver the first link after sign-up
    ///
    /// Not subject to the cooldown, but starts one so an immediate resend is
    /// refused.
    pub async fn send_initial_verification(&self, user_id: Uuid) -> DomainResult<ResendOutcome> {
        let now = Utc::now();
        let user = self.load_user(user_id).await?;

        if user.email_verified {
            return Ok(ResendOutcome::AlreadyVerified);
        }
        if user.has_exceeded_attempts(self.attempts.max_attempts()) {
            return Ok(ResendOutcome::ExceededAttempts);
        }

        self.issue_and_deliver(&user, now).await?;
        self.limiter.restart(&user.email, now).await?;

        Ok(ResendOutcome::Sent {
            next_resend_at: now + Duration::seconds(self.limiter.window_seconds()),
        })
    }

    /// Lift a lockout by clearing the user's attempt counter
    ///
    /// Leaves `email_verified` and existing tokens untouched.
    pub async fn reset_attempts(&self, user_id: Uuid) -> DomainResult<()> {
        self.attempts.reset_attempts(user_id).await?;

        tracing::info!(
            user_id = %user_id,
            event = "verification_attempts_reset",
            "Verification attempts reset by administrator"
        );

        Ok(())
    }

    async fn issue_and_deliver(
        &self,
        user: &UserProfile,
        now: DateTime<Utc>,
    ) -> DomainResult<VerificationToken> {
        let token = self.issuer.issue_token_at(user.id, now).await?;
        let url = self.verification_url(&token.token);

        let message_id = self
            .email_service
            .send_verification_email(&user.email, &url)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %user.id,
                    email = %mask_email(&user.email),
                    error = %e,
                    event = "verification_email_failed",
                    "Failed to deliver verification email"
                );
                DomainError::Delivery { message: e }
            })?;

        tracing::info!(
            user_id = %user.id,
            email = %mask_email(&user.email),
            message_id = %message_id,
            event = "verification_email_sent",
            "Verification email sent"
        );

        Ok(token)
    }

    async fn load_user(&self, user_id: Uuid) -> DomainResult<UserProfile> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "User".to_string(),
            })
    }
}

fn outcome_user(outcome: &VerifyEmailOutcome) -> Option<Uuid> {
    match outcome {
        VerifyEmailOutcome::Invalid => None,
        VerifyEmailOutcome::Success { user_id }
        | VerifyEmailOutcome::Expired { user_id }
        | VerifyEmailOutcome::AlreadyUsed { user_id }
        | VerifyEmailOutcome::AlreadyVerified { user_id }
        | VerifyEmailOutcome::ExceededAttempts { user_id }
        | VerifyEmailOutcome::Error { user_id } => Some(*user_id),
    }
}
