//! Application factory
//!
//! Builds the Actix-web application around an already wired `AppState`.

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use edu_core::repositories::{ResendCooldownStore, UserRepository, VerificationTokenRepository};
use edu_core::services::verification::EmailDeliveryTrait;

use crate::routes::health::{health_check, not_found};
use crate::routes::verification::{
    reset_attempts::reset_verification_attempts, resend::resend_verification,
    verify_email::{verify_email, verify_email_link},
    AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<T, U, C, E>(
    app_state: web::Data<AppState<T, U, C, E>>,
    cors: Cors,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    T: VerificationTokenRepository + 'static,
    U: UserRepository + 'static,
    C: ResendCooldownStore + 'static,
    E: EmailDeliveryTrait + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().limit(4096))
        // Registration order is inside-out: CORS runs after the tracing span opens
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<T, U, C, E>))
        // Target of the emailed link
        .route("/verify-email", web::get().to(verify_email_link::<T, U, C, E>))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/verify-email", web::post().to(verify_email::<T, U, C, E>))
                        .route(
                            "/resend-verification",
                            web::post().to(resend_verification::<T, U, C, E>),
                        ),
                )
                .service(web::scope("/admin").route(
                    "/users/{user_id}/verification-attempts/reset",
                    web::post().to(reset_verification_attempts::<T, U, C, E>),
                ))
                .route("/", web::get().to(api_documentation)),
        )
        .default_service(web::route().to(not_found))
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "LearnHub verification API v1",
        "endpoints": {
            "health": "/health",
            "verification_link": {
                "path": "/verify-email?token={token}",
                "method": "GET",
                "description": "Target of the emailed verification link"
            },
            "verify_email": {
                "path": "/api/v1/auth/verify-email",
                "method": "POST",
                "request_body": { "token": "string" },
                "responses": {
                    "200": "Email verified, or already verified",
                    "400": "Unknown token",
                    "403": "Too many verification attempts",
                    "409": "Token already used",
                    "410": "Token expired",
                    "503": "Service unavailable"
                }
            },
            "resend_verification": {
                "path": "/api/v1/auth/resend-verification",
                "method": "POST",
                "request_body": { "email": "string" },
                "responses": {
                    "200": "New link sent",
                    "400": "Invalid email",
                    "403": "Too many verification attempts",
                    "404": "No account for this email",
                    "409": "Email already verified",
                    "429": "Resend cooldown running (Retry-After header)",
                    "503": "Service unavailable"
                }
            },
            "reset_attempts": {
                "path": "/api/v1/admin/users/{user_id}/verification-attempts/reset",
                "method": "POST",
                "headers": { "X-Admin-Key": "string" },
                "responses": {
                    "200": "Attempts reset",
                    "401": "Missing or invalid admin key",
                    "404": "Unknown user, or admin routes disabled"
                }
            }
        }
    }))
}
