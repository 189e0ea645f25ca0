//! Mock implementations for testing the verification service

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::repositories::{MockResendCooldownStore, MockUserRepository, MockVerificationTokenRepository};
use crate::services::verification::{
    EmailDeliveryTrait, EmailVerificationService, VerificationServiceConfig,
};

// Mock email channel recording every (email, url) it accepts
pub struct MockEmailDelivery {
    pub sent_messages: Arc<Mutex<Vec<(String, String)>>>,
    pub should_fail: bool,
}

impl MockEmailDelivery {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }

    /// Token carried by the most recent link sent to `email`
    pub fn last_token_for(&self, email: &str) -> Option<String> {
        self.sent_messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .and_then(|(_, url)| url.split("token=").nth(1).map(str::to_string))
    }
}

#[async_trait]
impl EmailDeliveryTrait for MockEmailDelivery {
    async fn send_verification_email(&self, email: &str, url: &str) -> Result<String, String> {
        if self.should_fail {
            return Err("email provider unavailable".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .push((email.to_string(), url.to_string()));
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}

pub type TestService = EmailVerificationService<
    MockVerificationTokenRepository,
    MockUserRepository,
    MockResendCooldownStore,
    MockEmailDelivery,
>;

pub struct Harness {
    pub service: Arc<TestService>,
    pub tokens: Arc<MockVerificationTokenRepository>,
    pub users: Arc<MockUserRepository>,
    pub cooldowns: Arc<MockResendCooldownStore>,
    pub email: Arc<MockEmailDelivery>,
}

pub fn harness() -> Harness {
    harness_with(MockEmailDelivery::new(false), MockVerificationTokenRepository::new())
}

pub fn harness_with(email: MockEmailDelivery, tokens: MockVerificationTokenRepository) -> Harness {
    let tokens = Arc::new(tokens);
    let users = Arc::new(MockUserRepository::new());
    let cooldowns = Arc::new(MockResendCooldownStore::new());
    let email = Arc::new(email);

    let config = VerificationServiceConfig {
        base_url: "https://learnhub.test".to_string(),
        ..Default::default()
    };

    let service = Arc::new(EmailVerificationService::new(
        tokens.clone(),
        users.clone(),
        cooldowns.clone(),
        email.clone(),
        config,
    ));

    Harness {
        service,
        tokens,
        users,
        cooldowns,
        email,
    }
}
