//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// Email delivery provider settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider name ("mock" or "brevo")
    pub provider: String,

    /// Provider API key
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Provider endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Sender address
    pub sender_address: String,

    /// Sender display name
    #[serde(default)]
    pub sender_name: Option<String>,

    /// Timeout for provider requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Delivery attempts before reporting failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_key: String::new(),
            endpoint: default_endpoint(),
            sender_address: String::from("no-reply@learnhub.local"),
            sender_name: Some(String::from("LearnHub")),
            request_timeout_secs: default_request_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or(defaults.provider),
            api_key: std::env::var("BREVO_API_KEY").unwrap_or_default(),
            endpoint: std::env::var("EMAIL_API_ENDPOINT").unwrap_or(defaults.endpoint),
            sender_address: std::env::var("EMAIL_SENDER_ADDRESS")
                .unwrap_or(defaults.sender_address),
            sender_name: std::env::var("EMAIL_SENDER_NAME")
                .ok()
                .or(defaults.sender_name),
            request_timeout_secs: std::env::var("EMAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            max_retries: std::env::var("EMAIL_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
        }
    }

    /// Whether a real provider is configured
    pub fn is_configured(&self) -> bool {
        self.provider != "mock" && !self.api_key.trim().is_empty()
    }
}

fn default_endpoint() -> String {
    String::from("https://api.brevo.com/v3/smtp/email")
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}
