// Axum web server layer

use axum::{error_handling::HandleErrorLayer, http::StatusCode, routing::get, BoxError, Router};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;

pub mod handlers;
pub mod middleware;
pub mod responses;

use crate::engine::clock::Clock;
use crate::engine::query::ProgressionService;
use responses::ApiError;

// Re-export Config from config module
pub use crate::config::Config;

/// Application state shared by all handlers
///
/// Both members are immutable; cloning per request only bumps reference
/// counts.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: Arc<ProgressionService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            service: Arc::new(ProgressionService::new(clock)),
            config: Arc::new(config),
        }
    }
}

/// Create the Axum router with all routes and middleware
///
/// Middleware stack (outermost to innermost):
/// - Request ID generation (`x-request-id`, UUID v4)
/// - Request ID propagation onto the response
/// - Tracing (tower-http::trace) - method, path, status, latency
/// - Request timeout (tower::timeout) - from `RequestTimeoutSecs`
pub fn create_router(app_state: &AppState) -> Router {
    let timeout_secs = app_state.config.request_timeout_secs;

    let router = Router::new()
        .route("/api", get(handlers::default_progression_handler))
        .route("/api/:format", get(handlers::progression_handler))
        .route("/timezones", get(handlers::timezones_handler))
        .route("/health", get(handlers::health_handler))
        .with_state(app_state.clone());

    // HandleErrorLayer must come BEFORE timeout to catch the timeout error
    let timeout_stack = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|e: BoxError| async move {
            if e.is::<tower::timeout::error::Elapsed>() {
                ApiError::new(StatusCode::REQUEST_TIMEOUT, "request timed out".to_string())
            } else {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        }))
        .timeout(Duration::from_secs(timeout_secs))
        .into_inner();

    // Layers wrap in reverse order: the last one added runs first
    router
        .layer(timeout_stack)
        .layer(middleware::tracing_layer())
        .layer(middleware::propagate_request_id_layer())
        .layer(middleware::set_request_id_layer())
}
