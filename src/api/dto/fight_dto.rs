//! Fight-pool admission DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AccountId, ShapeId};

/// Request body for `POST /shapes/:id/fight-pool` and its probe variant.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EnterFightPoolRequest {
    /// Account invoking the operation. Must be the shape's owner.
    #[schema(value_type = Uuid)]
    pub caller: AccountId,
    /// Stake attached to the call (string-encoded u128).
    pub payment: String,
}

/// Response body for `POST /shapes/:id/fight-pool`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EnterFightPoolResponse {
    /// Shape that entered the pool.
    #[schema(value_type = Uuid)]
    pub shape_id: ShapeId,
    /// Stake recorded (string-encoded u128).
    pub stake: String,
    /// Whether the shape is now awaiting a random fight (always `true`).
    pub awaiting_random_fight: bool,
    /// Entry timestamp.
    pub entered_at: DateTime<Utc>,
}

/// Response body for `POST /shapes/:id/fight-pool/probe`.
///
/// Only returned when every admission precondition holds; a violated
/// precondition yields the same error response the committing call would.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeFightPoolResponse {
    /// Shape that was probed.
    #[schema(value_type = Uuid)]
    pub shape_id: ShapeId,
    /// Always `true` on a 200 response.
    pub admissible: bool,
    /// Probe timestamp.
    pub probed_at: DateTime<Utc>,
}

/// Response body for `GET /fight-pool`.
#[derive(Debug, Serialize, ToSchema)]
pub struct FightPoolResponse {
    /// Shapes currently awaiting a random match.
    #[schema(value_type = Vec<Uuid>)]
    pub members: Vec<ShapeId>,
    /// Number of shapes in the pool.
    pub count: usize,
}
