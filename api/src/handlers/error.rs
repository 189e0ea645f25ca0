use actix_web::{http::header, HttpRequest, HttpResponse};
use edu_core::errors::DomainError;
use edu_shared::{error_codes, ErrorResponse, Language};
use validator::ValidationErrors;

use crate::i18n;

/// Detect language preference from the Accept-Language header
pub fn language_from_request(req: &HttpRequest) -> Language {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}

/// 400 response for a request body that failed `validator` checks
pub fn validation_error_response(errors: ValidationErrors, lang: Language) -> HttpResponse {
    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, i18n::invalid_request(lang))
            .add_detail("validation_errors", errors),
    )
}

/// Handle domain errors with language support
///
/// Storage, delivery and internal failures all collapse into a single 503
/// so clients never see which collaborator failed.
pub fn handle_domain_error(error: DomainError, lang: Language) -> HttpResponse {
    match error {
        DomainError::Validation { .. } => {
            tracing::warn!(error = %error, "Verification request rejected");
            HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::VALIDATION_ERROR,
                i18n::invalid_request(lang),
            ))
        }
        DomainError::NotFound { .. } => {
            tracing::warn!(error = %error, "Verification request rejected");
            HttpResponse::NotFound().json(ErrorResponse::new(
                error_codes::USER_NOT_FOUND,
                i18n::user_not_found(lang),
            ))
        }
        DomainError::Storage { .. } | DomainError::Delivery { .. } | DomainError::Internal { .. } => {
            tracing::error!(error = %error, "Verification request failed on a collaborator");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                i18n::service_unavailable(lang),
            ))
        }
    }
}
