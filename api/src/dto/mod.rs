//! Request and response bodies

pub mod verification;

pub use verification::{
    ResendVerificationRequest, ResendVerificationResponse, ResetAttemptsResponse,
    VerifyEmailQuery, VerifyEmailRequest, VerifyEmailResponse,
};
