//! Email validation, normalization and masking

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .unwrap_or_else(|e| panic!("invalid email regex: {e}"))
});

/// Maximum accepted email length (RFC 5321 path limit)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Check whether a string looks like a deliverable email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Canonical form used for lookups and cooldown keys
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Mask an email address for logging
///
/// `jane.doe@example.com` becomes `j*******@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            let hidden = local.chars().count().saturating_sub(1).max(1);
            format!("{}{}@{}", first, "*".repeat(hidden), domain)
        }
        _ => "****".to_string(),
    }
}
