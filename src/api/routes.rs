//! Application route configuration.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::handlers::{admin_routes, auth_routes, public_routes, upload_routes};
use super::middleware::require_login;
use super::AppState;
use crate::config::STATIC_DIR;

/// Room for the multipart framing around the largest allowed file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the application router with all routes configured
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    let admin = admin_routes()
        .merge(upload_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_login));

    Router::new()
        .route("/health", get(health))
        .merge(public_routes())
        .nest("/auth", auth_routes())
        .merge(admin)
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        // Global middleware
        .layer(DefaultBodyLimit::max(
            max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status_code, database) = match state.database.ping().await {
        Ok(_) => (
            StatusCode::OK,
            ServiceStatus {
                status: "healthy",
                error: None,
            },
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            ServiceStatus {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        ),
    };

    let response = HealthResponse {
        status: database.status,
        database,
    };

    (status_code, Json(response))
}
