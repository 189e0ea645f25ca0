//! MySQL implementation of the VerificationTokenRepository trait.
//!
//! Tokens are persisted as SHA-256 digests. Lookups hash the presented
//! value first, so a leaked table does not yield usable links.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use edu_core::domain::entities::verification_token::VerificationToken;
use edu_core::errors::DomainError;
use edu_core::repositories::VerificationTokenRepository;

/// MySQL implementation of VerificationTokenRepository
pub struct MySqlVerificationTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Hash a token value using SHA-256
    ///
    /// # Returns
    /// Lowercase hexadecimal digest (64 characters)
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Convert a database row to a VerificationToken
    ///
    /// The raw token is not stored, so the caller supplies what goes in the
    /// `token` field: the presented value on lookup, the digest otherwise.
    fn row_to_token(row: &sqlx::mysql::MySqlRow, token: String) -> Result<VerificationToken, DomainError> {
        let user_id: String = row.try_get("user_id").map_err(DomainError::storage)?;

        Ok(VerificationToken {
            token,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(DomainError::storage)?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(DomainError::storage)?,
            used: row.try_get("used").map_err(DomainError::storage)?,
        })
    }
}

#[async_trait]
impl VerificationTokenRepository for MySqlVerificationTokenRepository {
    async fn insert(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        let query = r#"
            INSERT INTO email_verification_tokens (
                token_hash, user_id, created_at, expires_at, used
            ) VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(Self::hash_token(&token.token))
            .bind(token.user_id.to_string())
            .bind(token.created_at)
            .bind(token.expires_at)
            .bind(token.used)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to save verification token: {}", e)))?;

        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<VerificationToken>, DomainError> {
        let query = r#"
            SELECT user_id, created_at, expires_at, used
            FROM email_verification_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(Self::hash_token(token))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find verification token: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row, token.to_string())?)),
            None => Ok(None),
        }
    }

    async fn mark_used_if_unused(&self, token: &str) -> Result<bool, DomainError> {
        // Compare-and-set in one statement; the row lock serializes racers
        let query = r#"
            UPDATE email_verification_tokens
            SET used = TRUE
            WHERE token_hash = ? AND used = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(Self::hash_token(token))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to consume verification token: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<VerificationToken>, DomainError> {
        let query = r#"
            SELECT token_hash, user_id, created_at, expires_at, used
            FROM email_verification_tokens
            WHERE user_id = ?
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find user tokens: {}", e)))?;

        let mut tokens = Vec::with_capacity(rows.len());
        for row in rows {
            let digest: String = row.try_get("token_hash").map_err(DomainError::storage)?;
            tokens.push(Self::row_to_token(&row, digest)?);
        }

        Ok(tokens)
    }

    async fn delete_unused_expired_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let query = r#"
            DELETE FROM email_verification_tokens
            WHERE used = FALSE AND expires_at < ?
        "#;

        let result = sqlx::query(query)
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete expired tokens: {}", e)))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_stable_hex() {
        let token = VerificationToken::generate_token();
        let first = MySqlVerificationTokenRepository::hash_token(&token);
        let second = MySqlVerificationTokenRepository::hash_token(&token);

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert_ne!(first, token);
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            MySqlVerificationTokenRepository::hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
