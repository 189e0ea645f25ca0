//! Static shared-secret guard for admin routes

use actix_web::{HttpRequest, HttpResponse};
use constant_time_eq::constant_time_eq;
use edu_shared::{error_codes, ErrorResponse, Language};

use crate::i18n;

/// Header carrying the admin key
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Check the admin key header against the configured secret
///
/// Admin routes answer 404 when no key is configured, so a deployment without
/// `ADMIN_API_KEY` does not advertise them. A missing or wrong key gets 401.
pub fn require_admin_key(
    req: &HttpRequest,
    configured: Option<&str>,
    lang: Language,
) -> Result<(), HttpResponse> {
    let Some(expected) = configured else {
        return Err(HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            i18n::not_found(lang),
        )));
    };

    let presented = req
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if constant_time_eq(presented.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        tracing::warn!(
            event = "admin_key_rejected",
            path = %req.path(),
            "Admin request with missing or invalid key"
        );
        Err(HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::UNAUTHORIZED,
            i18n::unauthorized(lang),
        )))
    }
}
