//! DDL for the verification tables.
//!
//! Tokens are stored only as SHA-256 hex digests; the raw value exists in
//! the outgoing email and nowhere else.

pub const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id CHAR(36) NOT NULL PRIMARY KEY,
        email VARCHAR(254) NOT NULL,
        email_verified BOOLEAN NOT NULL DEFAULT FALSE,
        verification_attempts INT NOT NULL DEFAULT 0,
        created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
        updated_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6)
            ON UPDATE CURRENT_TIMESTAMP(6),
        UNIQUE KEY uq_users_email (email)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

pub const CREATE_EMAIL_VERIFICATION_TOKENS: &str = r#"
    CREATE TABLE IF NOT EXISTS email_verification_tokens (
        token_hash CHAR(64) NOT NULL PRIMARY KEY,
        user_id CHAR(36) NOT NULL,
        created_at TIMESTAMP(6) NOT NULL,
        expires_at TIMESTAMP(6) NOT NULL,
        used BOOLEAN NOT NULL DEFAULT FALSE,
        KEY idx_evt_user_id (user_id),
        KEY idx_evt_expires_at (expires_at),
        CONSTRAINT fk_evt_user FOREIGN KEY (user_id)
            REFERENCES users (id) ON DELETE CASCADE
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// Statements in dependency order
pub const STATEMENTS: [&str; 2] = [CREATE_USERS, CREATE_EMAIL_VERIFICATION_TOKENS];
