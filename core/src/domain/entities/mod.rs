//! Domain entities representing the verification state.

pub mod resend_cooldown;
pub mod user;
pub mod verification_token;

#[cfg(test)]
mod tests;

pub use resend_cooldown::{ResendCooldown, RESEND_COOLDOWN_SECONDS};
pub use user::{UserProfile, MAX_VERIFICATION_ATTEMPTS};
pub use verification_token::{VerificationToken, TOKEN_BYTES, TOKEN_HEX_LENGTH, TOKEN_TTL_HOURS};
