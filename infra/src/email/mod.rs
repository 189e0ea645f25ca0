//! Email module
//!
//! Outbound verification emails. Providers implement [`EmailService`];
//! [`EmailDeliveryAdapter`] renders the verification message and plugs any
//! provider into the core `EmailDeliveryTrait`.

use std::sync::Arc;

pub mod adapter;
pub mod brevo;
pub mod email_service;
pub mod mock_email;
pub mod template;

pub use adapter::EmailDeliveryAdapter;
pub use brevo::BrevoEmailService;
pub use email_service::{EmailMessage, EmailService};
pub use mock_email::MockEmailService;

#[cfg(test)]
mod tests;

/// Create an email service based on configuration
///
/// Unknown providers and a misconfigured Brevo setup fall back to the mock
/// service with an error in the log.
pub fn create_email_service(config: &crate::config::EmailConfig) -> Arc<dyn EmailService> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockEmailService::new()),
        "brevo" => match BrevoEmailService::new(config.clone()) {
            Ok(service) => Arc::new(service),
            Err(e) => {
                tracing::error!("Failed to initialize Brevo email service: {}", e);
                tracing::warn!("Falling back to mock email service");
                Arc::new(MockEmailService::new())
            }
        },
        other => {
            tracing::warn!("Unknown email provider '{}', using mock implementation", other);
            Arc::new(MockEmailService::new())
        }
    }
}
