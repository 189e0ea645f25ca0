//! Email verification token lifecycle
//!
//! This module composes the pieces of the "verify my email" flow:
//! - Token issuance with a fixed lifetime
//! - Read-only token classification and single-use consumption
//! - A per-user attempt ceiling
//! - A server-side per-email resend cooldown
//! - The orchestrator that strings them into one state machine

mod attempts;
mod config;
mod issuer;
mod resend_limiter;
mod service;
mod traits;
mod verifier;

#[cfg(test)]
mod tests;

pub use attempts::AttemptLimiter;
pub use config::VerificationServiceConfig;
pub use issuer::TokenIssuer;
pub use resend_limiter::ResendRateLimiter;
pub use service::EmailVerificationService;
pub use traits::EmailDeliveryTrait;
pub use verifier::TokenVerifier;
