use chrono::{Duration, Utc};
use uuid::Uuid;

use super::mocks::{harness, harness_with, Harness, MockEmailDelivery};
use crate::domain::entities::user::UserProfile;
use crate::domain::entities::verification_token::VerificationToken;
use crate::domain::value_objects::{ResendOutcome, VerifyEmailOutcome};
use crate::errors::DomainError;
use crate::repositories::{MockVerificationTokenRepository, UserRepository, VerificationTokenRepository};

const EMAIL: &str = "learner@example.com";

async fn seed_user(h: &Harness) -> UserProfile {
    h.users.insert(UserProfile::new(EMAIL)).await
}

async fn issue(h: &Harness, user_id: Uuid) -> String {
    h.service.issuer().issue_token(user_id).await.unwrap().token
}

#[tokio::test]
async fn test_verify_fresh_token_succeeds() {
    let h = harness();
    let user = seed_user(&h).await;
    let token = issue(&h, user.id).await;

    let outcome = h.service.verify_email(&token).await.unwrap();

    assert_eq!(outcome, VerifyEmailOutcome::Success { user_id: user.id });
    let stored = h.users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.email_verified);
    assert_eq!(stored.verification_attempts, 1);
}

#[tokio::test]
async fn test_verify_after_49_hours_is_expired() {
    let h = harness();
    let user = seed_user(&h).await;
    let issued = VerificationToken::issue(
        user.id,
        Utc::now() - Duration::hours(49),
        Duration::hours(48),
    );
    h.tokens.insert(issued.clone()).await.unwrap();

    let outcome = h.service.verify_email(&issued.token).await.unwrap();

    assert_eq!(outcome, VerifyEmailOutcome::Expired { user_id: user.id });
    assert!(outcome.offers_resend());
    let stored = h.users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(!stored.email_verified);
    assert_eq!(stored.verification_attempts, 0);
}

#[tokio::test]
async fn test_reverify_used_token_is_already_verified() {
    let h = harness();
    let user = seed_user(&h).await;
    let token = issue(&h, user.id).await;

    h.service.verify_email(&token).await.unwrap();
    let outcome = h.service.verify_email(&token).await.unwrap();

    assert_eq!(outcome, VerifyEmailOutcome::AlreadyVerified { user_id: user.id });
    assert!(outcome.is_verified());
}

#[tokio::test]
async fn test_used_token_for_unverified_user_is_already_used() {
    let h = harness();
    let user = seed_user(&h).await;
    let token = issue(&h, user.id).await;

    assert!(h.service.verifier().consume_token(&token).await.unwrap());

    let outcome = h.service.verify_email(&token).await.unwrap();
    assert_eq!(outcome, VerifyEmailOutcome::AlreadyUsed { user_id: user.id });
    assert!(outcome.offers_resend());
}

#[tokio::test]
async fn test_used_token_past_expiry_is_not_expired() {
    let h = harness();
    let user = seed_user(&h).await;
    let token = issue(&h, user.id).await;
    h.service.verify_email(&token).await.unwrap();

    let later = Utc::now() + Duration::hours(72);
    let outcome = h.service.verify_email_at(&token, later).await.unwrap();

    assert_eq!(outcome, VerifyEmailOutcome::AlreadyVerified { user_id: user.id });
}

#[tokio::test]
async fn test_never_issued_token_is_invalid() {
    let h = harness();
    seed_user(&h).await;

    let random = VerificationToken::generate_token();
    let outcome = h.service.verify_email(&random).await.unwrap();

    assert_eq!(outcome, VerifyEmailOutcome::Invalid);
}

#[tokio::test]
async fn test_sixth_attempt_is_refused_even_with_fresh_token() {
    let h = harness();
    let user = seed_user(&h).await;

    for _ in 0..5 {
        let token = issue(&h, user.id).await;
        let outcome = h.service.verify_email(&token).await.unwrap();
        assert_eq!(outcome, VerifyEmailOutcome::Success { user_id: user.id });
    }

    let fresh = issue(&h, user.id).await;
    let outcome = h.service.verify_email(&fresh).await.unwrap();

    assert_eq!(outcome, VerifyEmailOutcome::ExceededAttempts { user_id: user.id });
    assert!(!outcome.offers_resend());
    // The refused token stays unconsumed
    let stored = h.tokens.find_by_token(&fresh).await.unwrap().unwrap();
    assert!(!stored.used);
}

#[tokio::test]
async fn test_reset_attempts_lifts_lockout() {
    let h = harness();
    let user = seed_user(&h).await;
    for _ in 0..5 {
        h.users.increment_verification_attempts(user.id).await.unwrap();
    }

    let token = issue(&h, user.id).await;
    assert_eq!(
        h.service.verify_email(&token).await.unwrap(),
        VerifyEmailOutcome::ExceededAttempts { user_id: user.id }
    );

    h.service.reset_attempts(user.id).await.unwrap();

    assert_eq!(
        h.service.verify_email(&token).await.unwrap(),
        VerifyEmailOutcome::Success { user_id: user.id }
    );
}

#[tokio::test]
async fn test_reset_attempts_unknown_user() {
    let h = harness();

    let result = h.service.reset_attempts(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_verification_of_one_link() {
    let h = harness();
    let user = seed_user(&h).await;
    let token = issue(&h, user.id).await;

    let mut handles = Vec::new();
    for _ in 0..2 {
        let service = h.service.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move { service.verify_email(&token).await.unwrap() }));
    }

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap());
    }

    let successes = outcomes
        .iter()
        .filter(|o| matches!(o, VerifyEmailOutcome::Success { .. }))
        .count();
    assert_eq!(successes, 1);
    // The loser either lost the consume race or saw the token already used
    assert!(outcomes.iter().all(|o| o.is_verified()
        || matches!(o, VerifyEmailOutcome::Error { .. } | VerifyEmailOutcome::AlreadyUsed { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_attempts_cannot_pass_ceiling() {
    let h = harness();
    let user = seed_user(&h).await;
    for _ in 0..4 {
        h.users.increment_verification_attempts(user.id).await.unwrap();
    }

    let mut handles = Vec::new();
    for _ in 0..8 {
        let token = issue(&h, user.id).await;
        let service = h.service.clone();
        handles.push(tokio::spawn(async move { service.verify_email(&token).await.unwrap() }));
    }

    let mut successes = 0;
    for handle in handles {
        if matches!(handle.await.unwrap(), VerifyEmailOutcome::Success { .. }) {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
}

#[tokio::test]
async fn test_verify_storage_failure_is_error() {
    let h = harness_with(
        MockEmailDelivery::new(false),
        MockVerificationTokenRepository::failing(),
    );

    let result = h.service.verify_email(&VerificationToken::generate_token()).await;
    assert!(matches!(result, Err(e) if e.is_infrastructure()));
}

#[tokio::test]
async fn test_resend_sends_link() {
    let h = harness();
    let user = seed_user(&h).await;
    let now = Utc::now();

    let outcome = h.service.resend_verification_at(EMAIL, now).await.unwrap();

    assert_eq!(
        outcome,
        ResendOutcome::Sent {
            next_resend_at: now + Duration::seconds(300)
        }
    );
    assert_eq!(h.email.sent_count(), 1);

    let token = h.email.last_token_for(EMAIL).unwrap();
    assert_eq!(
        h.service.verify_email(&token).await.unwrap(),
        VerifyEmailOutcome::Success { user_id: user.id }
    );
}

#[tokio::test]
async fn test_resend_link_format() {
    let h = harness();
    seed_user(&h).await;

    h.service.resend_verification(EMAIL).await.unwrap();

    let (_, url) = h.email.sent_messages.lock().unwrap()[0].clone();
    assert!(url.starts_with("https://learnhub.test/verify-email?token="));
    assert!(VerificationToken::is_well_formed(url.rsplit('=').next().unwrap()));
}

#[tokio::test]
async fn test_rapid_resends_are_rate_limited() {
    let h = harness();
    let user = seed_user(&h).await;
    let now = Utc::now();

    let first = h.service.resend_verification_at(EMAIL, now).await.unwrap();
    assert!(matches!(first, ResendOutcome::Sent { .. }));

    for i in 1..6 {
        let at = now + Duration::seconds(i * 10);
        match h.service.resend_verification_at(EMAIL, at).await.unwrap() {
            ResendOutcome::RateLimited {
                retry_after_seconds,
            } => assert_eq!(retry_after_seconds, 300 - i * 10),
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    assert_eq!(h.email.sent_count(), 1);
    let stored = h.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.verification_attempts, 0);
}

#[tokio::test]
async fn test_resend_allowed_after_window() {
    let h = harness();
    seed_user(&h).await;
    let now = Utc::now();

    h.service.resend_verification_at(EMAIL, now).await.unwrap();
    let second = h
        .service
        .resend_verification_at(EMAIL, now + Duration::seconds(60))
        .await
        .unwrap();
    assert!(matches!(second, ResendOutcome::RateLimited { retry_after_seconds } if retry_after_seconds > 0));

    let third = h
        .service
        .resend_verification_at(EMAIL, now + Duration::seconds(301))
        .await
        .unwrap();
    assert!(matches!(third, ResendOutcome::Sent { .. }));
    assert_eq!(h.email.sent_count(), 2);
}

#[tokio::test]
async fn test_resend_normalizes_email() {
    let h = harness();
    seed_user(&h).await;

    let outcome = h.service.resend_verification("  Learner@Example.COM ").await.unwrap();

    assert!(matches!(outcome, ResendOutcome::Sent { .. }));
    assert!(h.email.last_token_for(EMAIL).is_some());
}

#[tokio::test]
async fn test_resend_unknown_email_releases_cooldown() {
    let h = harness();

    let outcome = h.service.resend_verification("ghost@example.com").await.unwrap();

    assert_eq!(outcome, ResendOutcome::NotFound);
    assert!(h.cooldowns.get("ghost@example.com").await.is_none());
    assert_eq!(h.email.sent_count(), 0);
}

#[tokio::test]
async fn test_resend_for_verified_user() {
    let h = harness();
    let user = seed_user(&h).await;
    h.users.set_email_verified(user.id, true).await.unwrap();

    let outcome = h.service.resend_verification(EMAIL).await.unwrap();

    assert_eq!(outcome, ResendOutcome::AlreadyVerified);
    assert_eq!(h.email.sent_count(), 0);
}

#[tokio::test]
async fn test_resend_for_locked_out_user() {
    let h = harness();
    let user = seed_user(&h).await;
    for _ in 0..5 {
        h.users.increment_verification_attempts(user.id).await.unwrap();
    }

    let outcome = h.service.resend_verification(EMAIL).await.unwrap();

    assert_eq!(outcome, ResendOutcome::ExceededAttempts);
    assert_eq!(h.email.sent_count(), 0);
}

#[tokio::test]
async fn test_resend_rejects_invalid_email() {
    let h = harness();

    let result = h.service.resend_verification("not-an-email").await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_delivery_failure_is_error_and_frees_cooldown() {
    let h = harness_with(
        MockEmailDelivery::new(true),
        MockVerificationTokenRepository::new(),
    );
    seed_user(&h).await;

    let result = h.service.resend_verification(EMAIL).await;

    assert!(matches!(result, Err(DomainError::Delivery { .. })));
    assert!(h.cooldowns.get(EMAIL).await.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resends_send_once() {
    let h = harness();
    seed_user(&h).await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let service = h.service.clone();
        handles.push(tokio::spawn(async move {
            service.resend_verification(EMAIL).await.unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(h.email.sent_count(), 1);
}

#[tokio::test]
async fn test_initial_verification_starts_cooldown() {
    let h = harness();
    let user = seed_user(&h).await;

    let outcome = h.service.send_initial_verification(user.id).await.unwrap();
    assert!(matches!(outcome, ResendOutcome::Sent { .. }));
    assert_eq!(h.email.sent_count(), 1);

    let resend = h.service.resend_verification(EMAIL).await.unwrap();
    assert!(matches!(resend, ResendOutcome::RateLimited { .. }));
}

#[tokio::test]
async fn test_initial_verification_bypasses_cooldown() {
    let h = harness();
    let user = seed_user(&h).await;

    h.service.resend_verification(EMAIL).await.unwrap();
    let outcome = h.service.send_initial_verification(user.id).await.unwrap();

    assert!(matches!(outcome, ResendOutcome::Sent { .. }));
    assert_eq!(h.email.sent_count(), 2);
}

#[test]
fn test_verification_url() {
    let h = harness();

    assert_eq!(
        h.service.verification_url("abc"),
        "https://learnhub.test/verify-email?token=abc"
    );
}
