use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpRequest, HttpResponse};
use async_trait::async_trait;
use serde_json::{Map, Value};

use edu_core::repositories::{ResendCooldownStore, UserRepository, VerificationTokenRepository};
use edu_core::services::verification::EmailDeliveryTrait;
use edu_infra::cache::RedisClient;
use edu_infra::database::DatabasePool;

use crate::handlers::language_from_request;
use crate::i18n;
use crate::routes::verification::AppState;

/// Upper bound for a single dependency check
const CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// A backing service whose reachability `/health` reports
#[async_trait]
pub trait DependencyCheck: Send + Sync {
    fn name(&self) -> &'static str;

    async fn is_healthy(&self) -> bool;
}

#[async_trait]
impl DependencyCheck for DatabasePool {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn is_healthy(&self) -> bool {
        self.health_check().await.unwrap_or(false)
    }
}

#[async_trait]
impl DependencyCheck for RedisClient {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn is_healthy(&self) -> bool {
        self.health_check().await.unwrap_or(false)
    }
}

/// Dependencies checked on every `/health` request
#[derive(Clone, Default)]
pub struct HealthChecks {
    checks: Vec<Arc<dyn DependencyCheck>>,
}

impl HealthChecks {
    pub fn new(checks: Vec<Arc<dyn DependencyCheck>>) -> Self {
        Self { checks }
    }

    /// Run every check and return `(all_healthy, per-dependency status)`
    pub async fn run(&self) -> (bool, Map<String, Value>) {
        let mut healthy = true;
        let mut report = Map::new();
        for check in &self.checks {
            let up = tokio::time::timeout(CHECK_TIMEOUT, check.is_healthy())
                .await
                .unwrap_or(false);
            if !up {
                tracing::warn!(dependency = check.name(), "Health check failed");
                healthy = false;
            }
            report.insert(
                check.name().to_string(),
                Value::from(if up { "up" } else { "down" }),
            );
        }
        (healthy, report)
    }
}

/// Health check endpoint handler
///
/// Returns 200 while every dependency answers, 503 with `"status": "degraded"` otherwise.
pub async fn health_check<T, U, C, E>(state: web::Data<AppState<T, U, C, E>>) -> HttpResponse
where
    T: VerificationTokenRepository + 'static,
    U: UserRepository + 'static,
    C: ResendCooldownStore + 'static,
    E: EmailDeliveryTrait + 'static,
{
    let (healthy, dependencies) = state.health.run().await;
    let body = serde_json::json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": "learnhub-verification-api",
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": dependencies,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Default 404 handler
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    let lang = language_from_request(&req);
    HttpResponse::NotFound().json(edu_shared::ErrorResponse::new(
        edu_shared::error_codes::NOT_FOUND,
        i18n::not_found(lang),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCheck {
        name: &'static str,
        healthy: bool,
    }

    #[async_trait]
    impl DependencyCheck for FixedCheck {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn is_healthy(&self) -> bool {
            self.healthy
        }
    }

    struct HangingCheck;

    #[async_trait]
    impl DependencyCheck for HangingCheck {
        fn name(&self) -> &'static str {
            "cache"
        }

        async fn is_healthy(&self) -> bool {
            std::future::pending::<()>().await;
            true
        }
    }

    #[actix_rt::test]
    async fn test_no_checks_is_healthy() {
        let (healthy, report) = HealthChecks::default().run().await;
        assert!(healthy);
        assert!(report.is_empty());
    }

    #[actix_rt::test]
    async fn test_one_failing_check_degrades() {
        let checks = HealthChecks::new(vec![
            Arc::new(FixedCheck {
                name: "database",
                healthy: true,
            }),
            Arc::new(FixedCheck {
                name: "cache",
                healthy: false,
            }),
        ]);
        let (healthy, report) = checks.run().await;
        assert!(!healthy);
        assert_eq!(report["database"], "up");
        assert_eq!(report["cache"], "down");
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_check_times_out_as_down() {
        let checks = HealthChecks::new(vec![Arc::new(HangingCheck)]);
        let (healthy, report) = checks.run().await;
        assert!(!healthy);
        assert_eq!(report["cache"], "down");
    }
}
