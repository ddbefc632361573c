//! Fight-pool admission handlers: enter, probe, and pool status.
//!
//! The probe endpoint is the read-only twin of the committing entry: it
//! runs the same precondition checks and fails with the same errors, but
//! never mutates state.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{
    EnterFightPoolRequest, EnterFightPoolResponse, FightPoolResponse, ProbeFightPoolResponse,
};
use crate::api::handlers::shape::parse_payment;
use crate::app_state::AppState;
use crate::domain::ShapeId;
use crate::error::{ArenaError, ErrorResponse};

/// `POST /shapes/:id/fight-pool` — Enter a shape into the random-fight pool.
///
/// # Errors
///
/// Returns [`ArenaError`] on a missing shape, non-owner caller,
/// insufficient stake, or duplicate entry; no state changes on failure.
#[utoipa::path(
    post,
    path = "/api/v1/shapes/{id}/fight-pool",
    tag = "Fight Pool",
    summary = "Enter the random-fight pool",
    description = "Admits the shape into the random-fight pool. The caller must own the shape, the payment must be at least the random-fight cost, and the shape must not already be awaiting a fight. The call is atomic: on any violation nothing changes.",
    params(
        ("id" = uuid::Uuid, Path, description = "Shape UUID"),
    ),
    request_body = EnterFightPoolRequest,
    responses(
        (status = 200, description = "Shape entered the pool", body = EnterFightPoolResponse),
        (status = 400, description = "Malformed payment", body = ErrorResponse),
        (status = 403, description = "Caller does not own the shape", body = ErrorResponse),
        (status = 404, description = "Shape not found", body = ErrorResponse),
        (status = 409, description = "Shape already awaiting a fight", body = ErrorResponse),
        (status = 422, description = "Stake below the random-fight cost", body = ErrorResponse),
    )
)]
pub async fn enter_fight_pool(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<EnterFightPoolRequest>,
) -> Result<impl IntoResponse, ArenaError> {
    let shape_id = ShapeId::from_uuid(id);
    let payment = parse_payment(&req.payment)?;

    state
        .arena_service
        .enter_random_fight_pool(shape_id, req.caller, payment)
        .await?;

    Ok(Json(EnterFightPoolResponse {
        shape_id,
        stake: payment.to_string(),
        awaiting_random_fight: true,
        entered_at: Utc::now(),
    }))
}

/// `POST /shapes/:id/fight-pool/probe` — Probe admission without committing.
///
/// # Errors
///
/// Fails with exactly the errors the committing variant would return.
#[utoipa::path(
    post,
    path = "/api/v1/shapes/{id}/fight-pool/probe",
    tag = "Fight Pool",
    summary = "Probe fight-pool admission",
    description = "Runs the admission precondition checks without entering the pool. Fails identically to the committing call; a 200 response means the entry would succeed right now.",
    params(
        ("id" = uuid::Uuid, Path, description = "Shape UUID"),
    ),
    request_body = EnterFightPoolRequest,
    responses(
        (status = 200, description = "Entry would succeed", body = ProbeFightPoolResponse),
        (status = 400, description = "Malformed payment", body = ErrorResponse),
        (status = 403, description = "Caller does not own the shape", body = ErrorResponse),
        (status = 404, description = "Shape not found", body = ErrorResponse),
        (status = 409, description = "Shape already awaiting a fight", body = ErrorResponse),
        (status = 422, description = "Stake below the random-fight cost", body = ErrorResponse),
    )
)]
pub async fn probe_fight_pool(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<EnterFightPoolRequest>,
) -> Result<impl IntoResponse, ArenaError> {
    let shape_id = ShapeId::from_uuid(id);
    let payment = parse_payment(&req.payment)?;

    state
        .arena_service
        .probe_enter_random_fight_pool(shape_id, req.caller, payment)
        .await?;

    Ok(Json(ProbeFightPoolResponse {
        shape_id,
        admissible: true,
        probed_at: Utc::now(),
    }))
}

/// `GET /fight-pool` — Current fight-pool membership.
#[utoipa::path(
    get,
    path = "/api/v1/fight-pool",
    tag = "Fight Pool",
    summary = "Fight-pool status",
    description = "Returns the shapes currently awaiting a random match.",
    responses(
        (status = 200, description = "Pool membership", body = FightPoolResponse),
    )
)]
pub async fn fight_pool_status(State(state): State<AppState>) -> impl IntoResponse {
    let members = state.arena_service.fight_pool().members().await;
    let count = members.len();
    Json(FightPoolResponse { members, count })
}

/// Fight-pool routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shapes/{id}/fight-pool", post(enter_fight_pool))
        .route("/shapes/{id}/fight-pool/probe", post(probe_fight_pool))
        .route("/fight-pool", get(fight_pool_status))
}
