use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use edu_api::routes::health::{DependencyCheck, HealthChecks};
use edu_api::{app::create_app, config, middleware::create_cors, telemetry, AppState};
use edu_core::services::{
    EmailVerificationService, TokenCleanupConfig, TokenCleanupService, VerificationServiceConfig,
};
use edu_infra::cache::{RedisClient, RedisResendCooldownStore};
use edu_infra::database::{DatabasePool, MySqlUserRepository, MySqlVerificationTokenRepository};
use edu_infra::email::{create_email_service, EmailDeliveryAdapter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load();
    telemetry::init_tracing(&config.logging);
    config::validate(&config).context("invalid configuration")?;

    tracing::info!(
        environment = %config.environment,
        "Starting LearnHub verification API"
    );

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to MySQL")?;
    database
        .run_migrations()
        .await
        .context("failed to apply schema")?;

    let tokens = Arc::new(MySqlVerificationTokenRepository::new(
        database.get_pool().clone(),
    ));
    let users = Arc::new(MySqlUserRepository::new(database.get_pool().clone()));

    let redis = RedisClient::new(config.cache.clone())
        .await
        .context("failed to connect to Redis")?;
    let health = HealthChecks::new(vec![
        Arc::new(database.clone()) as Arc<dyn DependencyCheck>,
        Arc::new(redis.clone()) as Arc<dyn DependencyCheck>,
    ]);
    let cooldowns = Arc::new(RedisResendCooldownStore::new(redis));

    let email_service = create_email_service(&config.email);
    let delivery = Arc::new(EmailDeliveryAdapter::new(
        email_service,
        config.verification.token_ttl_hours,
    ));
    tracing::info!(provider = delivery.provider_name(), "Email delivery configured");

    let verification_service = Arc::new(EmailVerificationService::new(
        tokens.clone(),
        users,
        cooldowns,
        delivery,
        VerificationServiceConfig::from(&config.verification),
    ));

    Arc::new(TokenCleanupService::new(
        tokens,
        TokenCleanupConfig::from(&config.verification),
    ))
    .start_background_task();

    let app_state = web::Data::new(
        AppState::new(verification_service, config.server.admin_api_key.clone())
            .with_health_checks(health),
    );

    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let environment = config.environment;
    let server_config = config.server.clone();
    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), create_cors(environment, &server_config))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    tracing::info!("Server stopped");
    Ok(())
}
