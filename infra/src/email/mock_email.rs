//! Mock email service for development and testing
//!
//! Records messages in memory instead of sending them. Message bodies carry
//! live tokens, so only the recipient and subject reach the log.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

use edu_shared::validation::mask_email;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// Mock email service
#[derive(Clone, Default)]
pub struct MockEmailService {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    simulate_failure: bool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service whose every send fails
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Messages accepted so far
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    pub fn message_count(&self) -> usize {
        self.sent.lock().map(|sent| sent.len()).unwrap_or(0)
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        if self.simulate_failure {
            return Err(InfrastructureError::Email(
                "Simulated email delivery failure".to_string(),
            ));
        }

        let message_id = format!("mock-{}", Uuid::new_v4());
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.clone());
        }

        info!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            message_id = %message_id,
            "Mock email recorded"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
