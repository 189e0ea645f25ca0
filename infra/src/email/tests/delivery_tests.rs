use std::sync::Arc;

use edu_core::services::verification::EmailDeliveryTrait;

use crate::email::template::verification_email;
use crate::email::{EmailDeliveryAdapter, EmailService, MockEmailService};

const URL: &str = "https://learnhub.test/verify-email?token=abc123";

#[test]
fn test_template_carries_link_and_lifetime() {
    let message = verification_email("learner@example.com", URL, 48);

    assert_eq!(message.to, "learner@example.com");
    assert!(message.text_body.contains(URL));
    assert!(message.html_body.contains(&format!("href=\"{}\"", URL)));
    assert!(message.text_body.contains("48 hours"));
    assert!(message.text_body.contains("48 小时"));
}

#[tokio::test]
async fn test_adapter_sends_rendered_message() {
    let mock = MockEmailService::new();
    let adapter = EmailDeliveryAdapter::new(Arc::new(mock.clone()), 48);

    let message_id = adapter
        .send_verification_email("learner@example.com", URL)
        .await
        .unwrap();

    assert!(message_id.starts_with("mock-"));
    let sent = mock.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "learner@example.com");
    assert!(sent[0].text_body.contains(URL));
    assert_eq!(adapter.provider_name(), "mock");
}

#[tokio::test]
async fn test_adapter_reports_failure() {
    let adapter = EmailDeliveryAdapter::new(Arc::new(MockEmailService::failing()), 48);

    let result = adapter
        .send_verification_email("learner@example.com", URL)
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_mock_counts_messages() {
    let mock = MockEmailService::new();
    let message = verification_email("a@b.io", URL, 48);

    mock.send_email(&message).await.unwrap();
    mock.send_email(&message).await.unwrap();

    assert_eq!(mock.message_count(), 2);
}
