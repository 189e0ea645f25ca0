use actix_web::{web, HttpRequest, HttpResponse};
use edu_shared::{error_codes, ErrorResponse};
use validator::Validate;

use edu_core::repositories::{ResendCooldownStore, UserRepository, VerificationTokenRepository};
use edu_core::services::verification::EmailDeliveryTrait;

use crate::dto::{VerifyEmailQuery, VerifyEmailRequest};
use crate::handlers::{
    handle_domain_error, language_from_request, validation_error_response,
    verify_outcome_response,
};
use crate::i18n;

use super::AppState;

/// Handler for GET /verify-email?token=...
///
/// Target of the link in the verification email. Answers with the same
/// JSON body as the POST endpoint.
///
/// ## Errors
/// - 400 Bad Request: missing or unknown token
/// - 409 Conflict: token already used, or consumed concurrently
/// - 410 Gone: token expired
/// - 403 Forbidden: attempt ceiling reached
/// - 503 Service Unavailable: storage failure
pub async fn verify_email_link<T, U, C, E>(
    req: HttpRequest,
    state: web::Data<AppState<T, U, C, E>>,
    query: web::Query<VerifyEmailQuery>,
) -> HttpResponse
where
    T: VerificationTokenRepository + 'static,
    U: UserRepository + 'static,
    C: ResendCooldownStore + 'static,
    E: EmailDeliveryTrait + 'static,
{
    let lang = language_from_request(&req);

    let token = match query.into_inner().token {
        Some(token) if !token.trim().is_empty() => token,
        _ => {
            return HttpResponse::BadRequest().json(
                ErrorResponse::new(error_codes::INVALID_TOKEN, i18n::missing_token(lang))
                    .add_detail("outcome", "invalid")
                    .add_detail("can_resend", true),
            );
        }
    };

    match state.verification_service.verify_email(token.trim()).await {
        Ok(outcome) => verify_outcome_response(outcome, lang),
        Err(error) => handle_domain_error(error, lang),
    }
}

/// Handler for POST /api/v1/auth/verify-email
///
/// # Request Body
///
/// ```json
/// { "token": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": { "outcome": "success", "message": "...", "verified": true },
///     "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
///
/// Failures use the `ErrorResponse` body with `outcome` and `can_resend`
/// details and the statuses listed on [`verify_email_link`].
pub async fn verify_email<T, U, C, E>(
    req: HttpRequest,
    state: web::Data<AppState<T, U, C, E>>,
    request: web::Json<VerifyEmailRequest>,
) -> HttpResponse
where
    T: VerificationTokenRepository + 'static,
    U: UserRepository + 'static,
    C: ResendCooldownStore + 'static,
    E: EmailDeliveryTrait + 'static,
{
    let lang = language_from_request(&req);

    if let Err(errors) = request.validate() {
        return validation_error_response(errors, lang);
    }

    match state
        .verification_service
        .verify_email(request.token.trim())
        .await
    {
        Ok(outcome) => verify_outcome_response(outcome, lang),
        Err(error) => handle_domain_error(error, lang),
    }
}
