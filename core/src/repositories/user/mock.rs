//! In-memory implementation of UserRepository for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::UserProfile;
use crate::errors::DomainError;

use super::r#trait::UserRepository;

/// Mock user repository
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, UserProfile>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a user
    pub async fn insert(&self, user: UserProfile) -> UserProfile {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        user
    }

    fn not_found() -> DomainError {
        DomainError::NotFound {
            resource: "User".to_string(),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn set_email_verified(&self, id: Uuid, verified: bool) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or_else(Self::not_found)?;
        if verified {
            user.mark_email_verified();
        } else {
            user.email_verified = false;
        }
        Ok(())
    }

    async fn increment_verification_attempts(&self, id: Uuid) -> Result<i32, DomainError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or_else(Self::not_found)?;
        Ok(user.record_attempt())
    }

    async fn reset_verification_attempts(&self, id: Uuid) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or_else(Self::not_found)?;
        user.reset_attempts();
        Ok(())
    }
}
