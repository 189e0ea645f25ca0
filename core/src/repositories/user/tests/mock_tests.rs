use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::UserProfile;
use crate::errors::DomainError;
use crate::repositories::user::{MockUserRepository, UserRepository};

#[tokio::test]
async fn test_find_by_email_and_id() {
    let repo = MockUserRepository::new();
    let user = repo.insert(UserProfile::new("learner@example.com")).await;

    let by_email = repo.find_by_email("learner@example.com").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(user.id));

    let by_id = repo.find_by_id(user.id).await.unwrap();
    assert_eq!(by_id.map(|u| u.email), Some("learner@example.com".to_string()));

    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_set_email_verified() {
    let repo = MockUserRepository::new();
    let user = repo.insert(UserProfile::new("learner@example.com")).await;

    repo.set_email_verified(user.id, true).await.unwrap();

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.email_verified);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let repo = MockUserRepository::new();

    let result = repo.increment_verification_attempts(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_are_not_lost() {
    let repo = Arc::new(MockUserRepository::new());
    let user = repo.insert(UserProfile::new("learner@example.com")).await;

    let mut handles = Vec::new();
    for _ in 0..20 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.increment_verification_attempts(user.id).await.unwrap()
        }));
    }

    let mut seen = Vec::new();
    for handle in handles {
        seen.push(handle.await.unwrap());
    }
    seen.sort_unstable();

    assert_eq!(seen, (1..=20).collect::<Vec<_>>());
    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.verification_attempts, 20);
}

#[tokio::test]
async fn test_reset_attempts() {
    let repo = MockUserRepository::new();
    let user = repo.insert(UserProfile::new("learner@example.com")).await;
    repo.increment_verification_attempts(user.id).await.unwrap();

    repo.reset_verification_attempts(user.id).await.unwrap();

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.verification_attempts, 0);
}
