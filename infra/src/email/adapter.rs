//! Bridges an email provider to the core delivery trait

use async_trait::async_trait;
use std::sync::Arc;

use edu_core::services::verification::EmailDeliveryTrait;

use super::email_service::EmailService;
use super::template;

/// Adapter that renders the verification email and sends it via a provider
#[derive(Clone)]
pub struct EmailDeliveryAdapter {
    service: Arc<dyn EmailService>,
    token_ttl_hours: i64,
}

impl EmailDeliveryAdapter {
    pub fn new(service: Arc<dyn EmailService>, token_ttl_hours: i64) -> Self {
        Self {
            service,
            token_ttl_hours,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.service.provider_name()
    }
}

#[async_trait]
impl EmailDeliveryTrait for EmailDeliveryAdapter {
    async fn send_verification_email(
        &self,
        email: &str,
        verification_url: &str,
    ) -> Result<String, String> {
        let message = template::verification_email(email, verification_url, self.token_ttl_hours);
        self.service
            .send_email(&message)
            .await
            .map_err(|e| e.to_string())
    }
}
