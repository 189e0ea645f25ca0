//! Outbound email collaborator

use async_trait::async_trait;

/// Trait for email delivery integration
#[async_trait]
pub trait EmailDeliveryTrait: Send + Sync {
    /// Send a verification link to an email address
    ///
    /// Returns the provider's message id on acceptance. Retry and backoff
    /// belong to the implementation; the caller treats `Err` as final.
    async fn send_verification_email(&self, email: &str, verification_url: &str)
        -> Result<String, String>;
}
