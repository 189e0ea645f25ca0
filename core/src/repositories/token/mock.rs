//! In-memory implementation of VerificationTokenRepository for tests and local runs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_token::VerificationToken;
use crate::errors::DomainError;

use super::r#trait::VerificationTokenRepository;

/// Mock token repository backed by a map guarded by an async lock
///
/// The write lock makes `mark_used_if_unused` a true compare-and-set.
pub struct MockVerificationTokenRepository {
    tokens: Arc<RwLock<HashMap<String, VerificationToken>>>,
    should_fail: bool,
}

impl MockVerificationTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            should_fail: false,
        }
    }

    /// Create a repository whose every call fails with a storage error
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// Number of stored tokens
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::storage("token store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockVerificationTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationTokenRepository for MockVerificationTokenRepository {
    async fn insert(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        self.check_available()?;
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token) {
            return Err(DomainError::Internal {
                message: "Token already exists".to_string(),
            });
        }

        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<VerificationToken>, DomainError> {
        self.check_available()?;
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token).cloned())
    }

    async fn mark_used_if_unused(&self, token: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(token) {
            Some(stored) if !stored.used => {
                stored.mark_as_used();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<VerificationToken>, DomainError> {
        self.check_available()?;
        let tokens = self.tokens.read().await;
        let mut owned: Vec<VerificationToken> = tokens
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn delete_unused_expired_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check_available()?;
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| token.used || token.expires_at >= cutoff);

        Ok((initial_count - tokens.len()) as u64)
    }
}
