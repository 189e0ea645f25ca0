//! Email service trait shared by all providers

use async_trait::async_trait;

use crate::InfrastructureError;

/// A rendered email ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Provider-facing email interface
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a message and return the provider's message id
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Short provider name for logs
    fn provider_name(&self) -> &'static str;
}
