//! Value objects describing verification results.

pub mod outcomes;

pub use outcomes::{CooldownCheck, ResendOutcome, TokenStatus, VerifyEmailOutcome};
