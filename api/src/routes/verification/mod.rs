//! Email verification route handlers
//!
//! - Following the emailed link (`GET /verify-email`)
//! - JSON verification and resend endpoints
//! - Admin reset of the attempt counter

pub mod reset_attempts;
pub mod resend;
pub mod verify_email;

use std::sync::Arc;

use edu_core::repositories::{ResendCooldownStore, UserRepository, VerificationTokenRepository};
use edu_core::services::verification::{EmailDeliveryTrait, EmailVerificationService};

use crate::routes::health::HealthChecks;

/// Application state shared by every worker
pub struct AppState<T, U, C, E>
where
    T: VerificationTokenRepository,
    U: UserRepository,
    C: ResendCooldownStore,
    E: EmailDeliveryTrait,
{
    pub verification_service: Arc<EmailVerificationService<T, U, C, E>>,
    /// Secret for admin routes; `None` disables them
    pub admin_api_key: Option<String>,
    /// Dependencies reported by `/health`
    pub health: HealthChecks,
}

impl<T, U, C, E> AppState<T, U, C, E>
where
    T: VerificationTokenRepository,
    U: UserRepository,
    C: ResendCooldownStore,
    E: EmailDeliveryTrait,
{
    pub fn new(
        verification_service: Arc<EmailVerificationService<T, U, C, E>>,
        admin_api_key: Option<String>,
    ) -> Self {
        Self {
            verification_service,
            admin_api_key,
            health: HealthChecks::default(),
        }
    }

    pub fn with_health_checks(mut self, health: HealthChecks) -> Self {
        self.health = health;
        self
    }
}
