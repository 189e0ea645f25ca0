//! End-to-end verification flow against the in-memory stores

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::sync::{Arc, Mutex};

    use edu_core::domain::entities::UserProfile;
    use edu_core::domain::value_objects::{ResendOutcome, TokenStatus, VerifyEmailOutcome};
    use edu_core::repositories::{
        MockResendCooldownStore, MockUserRepository, MockVerificationTokenRepository,
        UserRepository,
    };
    use edu_core::services::{
        EmailDeliveryTrait, EmailVerificationService, TokenCleanupConfig, TokenCleanupService,
        VerificationServiceConfig,
    };

    // Inbox that keeps the last link per address
    #[derive(Default)]
    struct Inbox {
        links: Mutex<Vec<(String, String)>>,
    }

    impl Inbox {
        fn token_for(&self, email: &str) -> Option<String> {
            self.links
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(to, _)| to == email)
                .and_then(|(_, link)| link.split("token=").nth(1).map(String::from))
        }
    }

    #[async_trait]
    impl EmailDeliveryTrait for Inbox {
        async fn send_verification_email(&self, email: &str, url: &str) -> Result<String, String> {
            self.links
                .lock()
                .unwrap()
                .push((email.to_string(), url.to_string()));
            Ok("inbox".to_string())
        }
    }

    type Service = EmailVerificationService<
        MockVerificationTokenRepository,
        MockUserRepository,
        MockResendCooldownStore,
        Inbox,
    >;

    struct World {
        service: Service,
        tokens: Arc<MockVerificationTokenRepository>,
        users: Arc<MockUserRepository>,
        inbox: Arc<Inbox>,
    }

    fn world() -> World {
        let tokens = Arc::new(MockVerificationTokenRepository::new());
        let users = Arc::new(MockUserRepository::new());
        let inbox = Arc::new(Inbox::default());
        let service = EmailVerificationService::new(
            tokens.clone(),
            users.clone(),
            Arc::new(MockResendCooldownStore::new()),
            inbox.clone(),
            VerificationServiceConfig::default(),
        );
        World {
            service,
            tokens,
            users,
            inbox,
        }
    }

    #[tokio::test]
    async fn test_signup_link_verifies_account() {
        let w = world();
        let user = w.users.insert(UserProfile::new("new.learner@example.com")).await;

        w.service.send_initial_verification(user.id).await.unwrap();
        let token = w.inbox.token_for("new.learner@example.com").unwrap();

        assert_eq!(
            w.service.verify_email(&token).await.unwrap(),
            VerifyEmailOutcome::Success { user_id: user.id }
        );
        assert_eq!(
            w.service.verify_email(&token).await.unwrap(),
            VerifyEmailOutcome::AlreadyVerified { user_id: user.id }
        );
        assert!(matches!(
            w.service.resend_verification("new.learner@example.com").await.unwrap(),
            ResendOutcome::RateLimited { retry_after_seconds } if retry_after_seconds > 0
        ));
    }

    #[tokio::test]
    async fn test_expired_link_then_resend() {
        let w = world();
        let user = w.users.insert(UserProfile::new("late@example.com")).await;
        let signup = Utc::now() - Duration::hours(49);

        let stale = w.service.issuer().issue_token_at(user.id, signup).await.unwrap();
        assert_eq!(
            w.service.verify_email(&stale.token).await.unwrap(),
            VerifyEmailOutcome::Expired { user_id: user.id }
        );

        let resend = w.service.resend_verification("late@example.com").await.unwrap();
        assert!(matches!(resend, ResendOutcome::Sent { .. }));

        let fresh = w.inbox.token_for("late@example.com").unwrap();
        assert_eq!(
            w.service.verify_email(&fresh).await.unwrap(),
            VerifyEmailOutcome::Success { user_id: user.id }
        );

        // The stale token is still expired, not consumed
        assert_eq!(
            w.service.verifier().verify_token(&stale.token).await.unwrap(),
            TokenStatus::Expired { user_id: user.id }
        );
    }

    #[tokio::test]
    async fn test_cleanup_removes_long_expired_tokens() {
        let w = world();
        let user = w.users.insert(UserProfile::new("old@example.com")).await;

        w.service
            .issuer()
            .issue_token_at(user.id, Utc::now() - Duration::days(30))
            .await
            .unwrap();
        w.service.issuer().issue_token(user.id).await.unwrap();

        let cleanup = TokenCleanupService::new(w.tokens.clone(), TokenCleanupConfig::default());
        let result = cleanup.run_cleanup().await.unwrap();

        assert_eq!(result.expired_tokens_deleted, 1);
        assert_eq!(w.tokens.len().await, 1);
    }

    #[tokio::test]
    async fn test_consumed_link_survives_cleanup() {
        let w = world();
        let user = w.users.insert(UserProfile::new("kept@example.com")).await;
        let now = Utc::now();

        let token = w
            .service
            .issuer()
            .issue_token_at(user.id, now - Duration::days(12))
            .await
            .unwrap();
        assert_eq!(
            w.service
                .verify_email_at(&token.token, now - Duration::days(11))
                .await
                .unwrap(),
            VerifyEmailOutcome::Success { user_id: user.id }
        );

        let cleanup = TokenCleanupService::new(w.tokens.clone(), TokenCleanupConfig::default());
        let result = cleanup.run_cleanup().await.unwrap();
        assert_eq!(result.expired_tokens_deleted, 0);

        assert_eq!(
            w.service.verify_email(&token.token).await.unwrap(),
            VerifyEmailOutcome::AlreadyVerified { user_id: user.id }
        );
    }

    #[tokio::test]
    async fn test_lockout_and_admin_reset() {
        let w = world();
        let user = w.users.insert(UserProfile::new("locked@example.com")).await;
        for _ in 0..5 {
            w.users.increment_verification_attempts(user.id).await.unwrap();
        }

        assert_eq!(
            w.service.resend_verification("locked@example.com").await.unwrap(),
            ResendOutcome::ExceededAttempts
        );

        w.service.reset_attempts(user.id).await.unwrap();

        assert!(matches!(
            w.service.resend_verification("locked@example.com").await.unwrap(),
            ResendOutcome::Sent { .. }
        ));
        let token = w.inbox.token_for("locked@example.com").unwrap();
        assert!(w.service.verify_email(&token).await.unwrap().is_verified());
    }
}
