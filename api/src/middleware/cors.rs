//! CORS middleware configuration for cross-origin requests.
//!
//! Development allows any origin so the web client can run from a local dev
//! server. Other environments only accept the origins listed in
//! `CORS_ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use edu_shared::config::{Environment, ServerConfig};

use super::admin_key::ADMIN_KEY_HEADER;

/// Preflight cache lifetime in seconds
const MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance configured for the given environment.
pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
            header::HeaderName::from_static(ADMIN_KEY_HEADER),
        ])
        .expose_headers(vec![header::RETRY_AFTER])
        .max_age(MAX_AGE);

    if environment.is_development() {
        tracing::info!("Configuring CORS for development environment");
        return cors.allow_any_origin();
    }

    tracing::info!(environment = %environment, "Configuring CORS with an origin allow-list");
    server
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            tracing::info!("Adding allowed origin: {}", origin);
            cors.allowed_origin(origin)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    #[actix_rt::test]
    async fn test_production_cors_rejects_unknown_origin() {
        let server = ServerConfig {
            allowed_origins: vec!["https://learnhub.example".to_string()],
            ..ServerConfig::default()
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Production, &server))
                .route("/health", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let allowed = test::TestRequest::get()
            .uri("/health")
            .insert_header((header::ORIGIN, "https://learnhub.example"))
            .to_request();
        let response = test::call_service(&app, allowed).await;
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

        let foreign = test::TestRequest::get()
            .uri("/health")
            .insert_header((header::ORIGIN, "https://evil.example"))
            .to_request();
        if let Ok(response) = test::try_call_service(&app, foreign).await {
            assert!(!response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        }
    }
}
