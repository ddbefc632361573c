//! Shape-related DTOs for purchase and list operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::common_dto::PaginationMeta;
use crate::domain::{AccountId, ShapeId};

/// Request body for `POST /shapes`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BuyShapeRequest {
    /// Account purchasing the shape. Omit to mint a fresh account.
    #[serde(default)]
    #[schema(value_type = Option<Uuid>)]
    pub buyer: Option<AccountId>,
    /// Payment attached to the call (string-encoded u128).
    pub payment: String,
}

/// Response body for `POST /shapes` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct BuyShapeResponse {
    /// Identifier of the new shape.
    #[schema(value_type = Uuid)]
    pub shape_id: ShapeId,
    /// Owning account.
    #[schema(value_type = Uuid)]
    pub owner: AccountId,
    /// Price paid (string-encoded u128).
    pub price: String,
    /// Server creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Shape summary for list responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShapeSummaryDto {
    /// Shape identifier.
    #[schema(value_type = Uuid)]
    pub shape_id: ShapeId,
    /// Owning account.
    #[schema(value_type = Uuid)]
    pub owner: AccountId,
    /// Whether the shape is awaiting a random fight.
    pub awaiting_random_fight: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Paginated list response for `GET /shapes`.
///
/// `data` preserves creation order across pages.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShapeListResponse {
    /// Shape summaries in creation order.
    pub data: Vec<ShapeSummaryDto>,
    /// Pagination metadata.
    #[schema(value_type = Object)]
    pub pagination: PaginationMeta,
}

/// Query parameters for `GET /shapes`.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct ShapeListFilter {
    /// Restrict the list to shapes owned by this account.
    #[serde(default)]
    pub owner: Option<Uuid>,
}
