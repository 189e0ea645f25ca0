use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use edu_core::repositories::{ResendCooldownStore, UserRepository, VerificationTokenRepository};
use edu_core::services::verification::EmailDeliveryTrait;
use edu_shared::ApiResponse;

use crate::dto::ResetAttemptsResponse;
use crate::handlers::{handle_domain_error, language_from_request};
use crate::i18n;
use crate::middleware::require_admin_key;

use super::AppState;

/// Handler for POST /api/v1/admin/users/{user_id}/verification-attempts/reset
///
/// Lifts a verification lockout. Requires the `X-Admin-Key` header.
/// The user's verified flag and tokens are left untouched.
pub async fn reset_verification_attempts<T, U, C, E>(
    req: HttpRequest,
    state: web::Data<AppState<T, U, C, E>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    T: VerificationTokenRepository + 'static,
    U: UserRepository + 'static,
    C: ResendCooldownStore + 'static,
    E: EmailDeliveryTrait + 'static,
{
    let lang = language_from_request(&req);

    if let Err(response) = require_admin_key(&req, state.admin_api_key.as_deref(), lang) {
        return response;
    }

    let user_id = path.into_inner();
    match state.verification_service.reset_attempts(user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(ResetAttemptsResponse {
            user_id,
            verification_attempts: 0,
            message: i18n::attempts_reset(lang),
        })),
        Err(error) => handle_domain_error(error, lang),
    }
}
