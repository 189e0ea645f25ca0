//! Outcome to HTTP status mapping
//!
//! | outcome                     | status |
//! |-----------------------------|--------|
//! | verify `success`            | 200    |
//! | verify `already_verified`   | 200    |
//! | verify `invalid`            | 400    |
//! | verify `expired`            | 410    |
//! | verify `already_used`       | 409    |
//! | verify `error`              | 409    |
//! | `exceeded_attempts`         | 403    |
//! | resend `sent`               | 200    |
//! | resend `rate_limited`       | 429    |
//! | resend `not_found`          | 404    |
//! | resend `already_verified`   | 409    |

use actix_web::{http::header, HttpResponse};
use edu_core::domain::value_objects::{ResendOutcome, VerifyEmailOutcome};
use edu_shared::{error_codes, ApiResponse, ErrorResponse, Language};

use crate::dto::{ResendVerificationResponse, VerifyEmailResponse};
use crate::i18n;

pub fn verify_outcome_response(outcome: VerifyEmailOutcome, lang: Language) -> HttpResponse {
    let message = i18n::verify_outcome_message(&outcome, lang);

    let (mut builder, code) = match outcome {
        VerifyEmailOutcome::Success { .. } | VerifyEmailOutcome::AlreadyVerified { .. } => {
            return HttpResponse::Ok().json(ApiResponse::success(VerifyEmailResponse {
                outcome: outcome.code().to_string(),
                message,
                verified: true,
            }));
        }
        VerifyEmailOutcome::Invalid => (HttpResponse::BadRequest(), error_codes::INVALID_TOKEN),
        VerifyEmailOutcome::Expired { .. } => (HttpResponse::Gone(), error_codes::TOKEN_EXPIRED),
        VerifyEmailOutcome::AlreadyUsed { .. } => {
            (HttpResponse::Conflict(), error_codes::TOKEN_ALREADY_USED)
        }
        VerifyEmailOutcome::ExceededAttempts { .. } => {
            (HttpResponse::Forbidden(), error_codes::ATTEMPTS_EXCEEDED)
        }
        VerifyEmailOutcome::Error { .. } => {
            (HttpResponse::Conflict(), error_codes::VERIFICATION_RACE_LOST)
        }
    };

    builder.json(
        ErrorResponse::new(code, message)
            .add_detail("outcome", outcome.code())
            .add_detail("can_resend", outcome.offers_resend()),
    )
}

pub fn resend_outcome_response(outcome: ResendOutcome, lang: Language) -> HttpResponse {
    let message = i18n::resend_outcome_message(&outcome, lang);

    match outcome {
        ResendOutcome::Sent { next_resend_at } => {
            HttpResponse::Ok().json(ApiResponse::success(ResendVerificationResponse {
                outcome: outcome.code().to_string(),
                message,
                next_resend_at,
            }))
        }
        ResendOutcome::RateLimited {
            retry_after_seconds,
        } => HttpResponse::TooManyRequests()
            .insert_header((header::RETRY_AFTER, retry_after_seconds.max(1).to_string()))
            .json(
                ErrorResponse::new(error_codes::RATE_LIMIT_EXCEEDED, message)
                    .add_detail("outcome", outcome.code())
                    .add_detail("retry_after_seconds", retry_after_seconds),
            ),
        ResendOutcome::NotFound => HttpResponse::NotFound().json(
            ErrorResponse::new(error_codes::USER_NOT_FOUND, message)
                .add_detail("outcome", outcome.code()),
        ),
        ResendOutcome::AlreadyVerified => HttpResponse::Conflict().json(
            ErrorResponse::new(error_codes::EMAIL_ALREADY_VERIFIED, message)
                .add_detail("outcome", outcome.code()),
        ),
        ResendOutcome::ExceededAttempts => HttpResponse::Forbidden().json(
            ErrorResponse::new(error_codes::ATTEMPTS_EXCEEDED, message)
                .add_detail("outcome", outcome.code()),
        ),
    }
}
