//! Shape entry: per-shape state tracked by the registry.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AccountId, ShapeId};

/// Aggregate holding one shape's state and server-side metadata.
///
/// Each shape in the registry is stored as a `ShapeEntry`. The `owner`
/// field is fixed at purchase time; `awaiting_random_fight` and `stake`
/// change only through fight-pool admission.
#[derive(Debug)]
pub struct ShapeEntry {
    /// Unique shape identifier (immutable after creation).
    pub shape_id: ShapeId,

    /// Account that purchased the shape (immutable after creation).
    pub owner: AccountId,

    /// Whether the shape is currently in the random-fight pool.
    pub awaiting_random_fight: bool,

    /// Stake paid on the current fight-pool entry, if any.
    pub stake: Option<u128>,

    /// Price paid at purchase, in smallest currency units.
    pub purchase_price: u128,

    /// ISO-8601 creation timestamp (immutable after creation).
    pub created_at: DateTime<Utc>,

    /// ISO-8601 timestamp of last state mutation.
    pub last_modified_at: DateTime<Utc>,
}

impl ShapeEntry {
    /// Creates a new `ShapeEntry` for a freshly purchased shape.
    ///
    /// The shape starts outside the fight pool with no recorded stake.
    #[must_use]
    pub fn new(shape_id: ShapeId, owner: AccountId, purchase_price: u128) -> Self {
        let now = Utc::now();
        Self {
            shape_id,
            owner,
            awaiting_random_fight: false,
            stake: None,
            purchase_price,
            created_at: now,
            last_modified_at: now,
        }
    }
}

/// Lightweight summary of a shape for list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ShapeSummary {
    /// Shape identifier.
    pub shape_id: ShapeId,
    /// Owning account.
    pub owner: AccountId,
    /// Whether the shape is awaiting a random fight.
    pub awaiting_random_fight: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&ShapeEntry> for ShapeSummary {
    fn from(entry: &ShapeEntry) -> Self {
        Self {
            shape_id: entry.shape_id,
            owner: entry.owner,
            awaiting_random_fight: entry.awaiting_random_fight,
            created_at: entry.created_at,
        }
    }
}
