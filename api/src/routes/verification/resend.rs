use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use edu_core::repositories::{ResendCooldownStore, UserRepository, VerificationTokenRepository};
use edu_core::services::verification::EmailDeliveryTrait;

use crate::dto::ResendVerificationRequest;
use crate::handlers::{
    handle_domain_error, language_from_request, resend_outcome_response,
    validation_error_response,
};

use super::AppState;

/// Handler for POST /api/v1/auth/resend-verification
///
/// # Request Body
///
/// ```json
/// { "email": "learner@example.com" }
/// ```
///
/// ## Responses
/// - 200 OK: a new link was sent; `next_resend_at` tells when the next one may be requested
/// - 400 Bad Request: malformed email
/// - 403 Forbidden: attempt ceiling reached
/// - 404 Not Found: no account for this email
/// - 409 Conflict: email already verified
/// - 429 Too Many Requests: cooldown running, see the `Retry-After` header
/// - 503 Service Unavailable: storage or email provider failure
pub async fn resend_verification<T, U, C, E>(
    req: HttpRequest,
    state: web::Data<AppState<T, U, C, E>>,
    request: web::Json<ResendVerificationRequest>,
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
        .resend_verification(&request.email)
        .await
    {
        Ok(outcome) => resend_outcome_response(outcome, lang),
        Err(error) => handle_domain_error(error, lang),
    }
}
