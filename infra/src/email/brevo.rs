//! Brevo transactional email service
//!
//! Sends through `POST /v3/smtp/email` with an `api-key` header. Rate limit
//! (429) and server (5xx) responses are retried with exponential backoff;
//! other client errors fail immediately.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use edu_shared::validation::mask_email;

use super::email_service::{EmailMessage, EmailService};
use crate::config::EmailConfig;
use crate::InfrastructureError;

/// Initial backoff between attempts
const RETRY_DELAY_MS: u64 = 500;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoEmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendEmailBody {
    sender: BrevoEmailAddress,
    to: Vec<BrevoEmailAddress>,
    subject: String,
    html_content: String,
    text_content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendEmailResponse {
    message_id: Option<String>,
}

/// Brevo email service
pub struct BrevoEmailService {
    client: reqwest::Client,
    config: EmailConfig,
}

impl BrevoEmailService {
    /// Create a new Brevo email service
    ///
    /// # Errors
    /// * `InfrastructureError::Config` - API key or sender address missing
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "BREVO_API_KEY is required".to_string(),
            ));
        }
        if config.sender_address.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "EMAIL_SENDER_ADDRESS is required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("learnhub-verification/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    fn body(&self, message: &EmailMessage) -> BrevoSendEmailBody {
        BrevoSendEmailBody {
            sender: BrevoEmailAddress {
                email: self.config.sender_address.clone(),
                name: self.config.sender_name.clone(),
            },
            to: vec![BrevoEmailAddress {
                email: message.to.clone(),
                name: None,
            }],
            subject: message.subject.clone(),
            html_content: message.html_body.clone(),
            text_content: message.text_body.clone(),
        }
    }

    async fn send_once(&self, body: &BrevoSendEmailBody) -> Result<String, SendFailure> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("api-key", &self.config.api_key)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    SendFailure::Retryable(e.to_string())
                } else {
                    SendFailure::Fatal(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            let parsed: BrevoSendEmailResponse = response.json().await.unwrap_or(BrevoSendEmailResponse {
                message_id: None,
            });
            return Ok(parsed.message_id.unwrap_or_else(|| "unknown".to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        let detail = format!("Brevo send failed (status={}): {}", status.as_u16(), text);
        if is_retryable_status(status) {
            Err(SendFailure::Retryable(detail))
        } else {
            Err(SendFailure::Fatal(detail))
        }
    }
}

enum SendFailure {
    Retryable(String),
    Fatal(String),
}

pub(crate) fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl EmailService for BrevoEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let body = self.body(message);
        let max_attempts = self.config.max_retries.max(1);
        let mut delay = Duration::from_millis(RETRY_DELAY_MS);
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(
                "Sending email attempt {}/{} to {}",
                attempts,
                max_attempts,
                mask_email(&message.to)
            );

            match self.send_once(&body).await {
                Ok(message_id) => {
                    info!(
                        "Email sent to {} via Brevo with id: {}",
                        mask_email(&message.to),
                        message_id
                    );
                    return Ok(message_id);
                }
                Err(SendFailure::Retryable(detail)) if attempts < max_attempts => {
                    warn!(
                        "Email send failed (attempt {}/{}): {}. Retrying in {:?}",
                        attempts, max_attempts, detail, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(SendFailure::Retryable(detail)) | Err(SendFailure::Fatal(detail)) => {
                    error!("Email send failed after {} attempts: {}", attempts, detail);
                    return Err(InfrastructureError::Email(detail));
                }
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "brevo"
    }
}
