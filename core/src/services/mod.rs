//! Business services containing domain logic and use cases.

pub mod cleanup;
pub mod verification;

// Re-export commonly used types
pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use verification::{
    AttemptLimiter, EmailDeliveryTrait, EmailVerificationService, ResendRateLimiter,
    TokenIssuer, TokenVerifier, VerificationServiceConfig,
};
