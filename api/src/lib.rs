//! HTTP boundary for the LearnHub email verification flow
//!
//! Library exports are shared by the binary and the integration tests.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::verification::AppState;
