//! System endpoints: health check and protocol constants.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::AccountId;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Protocol constants and registry identity.
#[derive(Debug, Serialize, ToSchema)]
struct ProtocolResponse {
    #[schema(value_type = Uuid)]
    manager: AccountId,
    shape_cost: String,
    random_fight_cost: String,
    shape_count: usize,
    fight_pool_size: usize,
}

/// `GET /config/protocol` — Manager identity and protocol minimums.
#[utoipa::path(
    get,
    path = "/config/protocol",
    tag = "System",
    summary = "Protocol constants",
    description = "Returns the manager account fixed at startup, the shape purchase cost, the random-fight stake minimum, and current registry counters.",
    responses(
        (status = 200, description = "Protocol constants", body = ProtocolResponse),
    )
)]
pub async fn protocol_handler(State(state): State<AppState>) -> impl IntoResponse {
    let service = &state.arena_service;
    let response = ProtocolResponse {
        manager: service.manager(),
        shape_cost: service.shape_cost().to_string(),
        random_fight_cost: service.random_fight_cost().to_string(),
        shape_count: service.registry().len().await,
        fight_pool_size: service.fight_pool().len().await,
    };
    (StatusCode::OK, Json(response))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/protocol", get(protocol_handler))
}
