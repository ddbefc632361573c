//! Shape handlers: buy, list, get.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    BuyShapeRequest, BuyShapeResponse, PaginationMeta, PaginationParams, ShapeListFilter,
    ShapeListResponse, ShapeSummaryDto,
};
use crate::app_state::AppState;
use crate::domain::{AccountId, ShapeId};
use crate::error::{ArenaError, ErrorResponse};

/// `POST /shapes` — Purchase a new shape.
///
/// # Errors
///
/// Returns [`ArenaError`] on malformed payment or underpayment.
#[utoipa::path(
    post,
    path = "/api/v1/shapes",
    tag = "Shapes",
    summary = "Buy a shape",
    description = "Purchases a new shape for the calling account. The payment must be at least the configured shape cost; the new shape starts outside the fight pool.",
    request_body = BuyShapeRequest,
    responses(
        (status = 201, description = "Shape created", body = BuyShapeResponse),
        (status = 400, description = "Malformed payment", body = ErrorResponse),
        (status = 422, description = "Payment below the shape cost", body = ErrorResponse),
    )
)]
pub async fn buy_shape(
    State(state): State<AppState>,
    Json(req): Json<BuyShapeRequest>,
) -> Result<impl IntoResponse, ArenaError> {
    let payment = parse_payment(&req.payment)?;
    let buyer = req.buyer.unwrap_or_default();

    let shape_id = state.arena_service.buy_shape(buyer, payment).await?;

    let entry_lock = state.arena_service.registry().get(shape_id).await?;
    let entry = entry_lock.read().await;
    let response = BuyShapeResponse {
        shape_id,
        owner: entry.owner,
        price: entry.purchase_price.to_string(),
        created_at: entry.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /shapes` — List all shapes in creation order.
///
/// # Errors
///
/// Returns [`ArenaError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/shapes",
    tag = "Shapes",
    summary = "List shapes",
    description = "Returns a paginated list of every shape ever purchased, in creation order, optionally filtered by owner.",
    params(PaginationParams, ShapeListFilter),
    responses(
        (status = 200, description = "Paginated shape list", body = ShapeListResponse),
    )
)]
pub async fn list_shapes(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<ShapeListFilter>,
) -> Result<impl IntoResponse, ArenaError> {
    let params = params.clamped();
    let owner = filter.owner.map(AccountId::from_uuid);
    let summaries = state.arena_service.list_shapes(owner).await;

    let total = summaries.len() as u32;
    let per_page = params.per_page;
    let page = params.page;
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(per_page)
    };

    let data: Vec<ShapeSummaryDto> = summaries
        .into_iter()
        .skip(page_offset(page, per_page))
        .take(per_page as usize)
        .map(|s| ShapeSummaryDto {
            shape_id: s.shape_id,
            owner: s.owner,
            awaiting_random_fight: s.awaiting_random_fight,
            created_at: s.created_at,
        })
        .collect();

    Ok(Json(ShapeListResponse {
        data,
        pagination: PaginationMeta {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// `GET /shapes/:id` — Get shape details.
///
/// # Errors
///
/// Returns [`ArenaError::ShapeNotFound`] if the shape does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/shapes/{id}",
    tag = "Shapes",
    summary = "Get shape details",
    description = "Returns full details for a single shape including owner, fight-pool status, and recorded stake.",
    params(
        ("id" = uuid::Uuid, Path, description = "Shape UUID"),
    ),
    responses(
        (status = 200, description = "Shape details", body = serde_json::Value),
        (status = 404, description = "Shape not found", body = ErrorResponse),
    )
)]
pub async fn get_shape(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ArenaError> {
    let shape_id = ShapeId::from_uuid(id);
    let entry_lock = state.arena_service.registry().get(shape_id).await?;
    let entry = entry_lock.read().await;

    let response = serde_json::json!({
        "shape_id": entry.shape_id,
        "owner": entry.owner,
        "awaiting_random_fight": entry.awaiting_random_fight,
        "stake": entry.stake.map(|s| s.to_string()),
        "purchase_price": entry.purchase_price.to_string(),
        "created_at": entry.created_at.to_rfc3339(),
        "updated_at": entry.last_modified_at.to_rfc3339(),
    });

    Ok(Json(response))
}

/// Shape routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shapes", post(buy_shape).get(list_shapes))
        .route("/shapes/{id}", get(get_shape))
}

/// Zero-based item offset for a 1-indexed page. Saturates instead of
/// overflowing so hostile `page` values cannot panic the handler.
fn page_offset(page: u32, per_page: u32) -> usize {
    (page.saturating_sub(1) as usize).saturating_mul(per_page as usize)
}

/// Parses a string-encoded u128 payment amount.
///
/// # Errors
///
/// Returns [`ArenaError::InvalidRequest`] if the string is not a valid
/// unsigned integer.
pub(crate) fn parse_payment(raw: &str) -> Result<u128, ArenaError> {
    raw.parse()
        .map_err(|_| ArenaError::InvalidRequest(format!("invalid payment: {raw}")))
}
