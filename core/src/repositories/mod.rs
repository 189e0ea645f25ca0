pub mod cooldown;
pub mod token;
pub mod user;

pub use cooldown::{MockResendCooldownStore, ResendCooldownStore};
pub use token::{MockVerificationTokenRepository, VerificationTokenRepository};
pub use user::{MockUserRepository, UserRepository};
