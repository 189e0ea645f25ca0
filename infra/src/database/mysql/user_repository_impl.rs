//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use edu_core::domain::entities::user::UserProfile;
use edu_core::errors::DomainError;
use edu_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert a user row
    ///
    /// Account creation belongs to the sign-up flow; this exists for seeding
    /// and integration tests.
    pub async fn insert(&self, user: &UserProfile) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, email_verified, verification_attempts, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(user.email_verified)
            .bind(user.verification_attempts)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to insert user: {}", e)))?;

        Ok(())
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<UserProfile, DomainError> {
        let id: String = row.try_get("id").map_err(DomainError::storage)?;

        Ok(UserProfile {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(DomainError::storage)?,
            email_verified: row.try_get("email_verified").map_err(DomainError::storage)?,
            verification_attempts: row
                .try_get("verification_attempts")
                .map_err(DomainError::storage)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(DomainError::storage)?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(DomainError::storage)?,
        })
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(DomainError::storage)?;
        let n: i64 = row.try_get("n").map_err(DomainError::storage)?;
        Ok(n > 0)
    }

    /// MySQL reports zero affected rows when the value did not change, so a
    /// zero count only means "missing" once a lookup confirms it.
    async fn ensure_updated(&self, id: Uuid, rows_affected: u64) -> Result<(), DomainError> {
        if rows_affected == 0 && !self.exists(id).await? {
            return Err(not_found());
        }
        Ok(())
    }
}

fn not_found() -> DomainError {
    DomainError::NotFound {
        resource: "User".to_string(),
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, DomainError> {
        let query = r#"
            SELECT id, email, email_verified, verification_attempts, created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find user: {}", e)))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, DomainError> {
        let query = r#"
            SELECT id, email, email_verified, verification_attempts, created_at, updated_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find user by email: {}", e)))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn set_email_verified(&self, id: Uuid, verified: bool) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET email_verified = ? WHERE id = ?")
            .bind(verified)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update email_verified: {}", e)))?;

        self.ensure_updated(id, result.rows_affected()).await
    }

    async fn increment_verification_attempts(&self, id: Uuid) -> Result<i32, DomainError> {
        let mut tx = self.pool.begin().await.map_err(DomainError::storage)?;

        // The UPDATE holds the row lock until commit, so the SELECT sees
        // exactly this transaction's increment.
        let result = sqlx::query(
            "UPDATE users SET verification_attempts = verification_attempts + 1 WHERE id = ?",
        )
        .bind(id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to increment attempts: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }

        let row = sqlx::query("SELECT verification_attempts FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&mut *tx)
            .await
            .map_err(DomainError::storage)?;
        let count: i32 = row
            .try_get("verification_attempts")
            .map_err(DomainError::storage)?;

        tx.commit().await.map_err(DomainError::storage)?;

        Ok(count)
    }

    async fn reset_verification_attempts(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET verification_attempts = 0 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to reset attempts: {}", e)))?;

        self.ensure_updated(id, result.rows_affected()).await
    }
}
