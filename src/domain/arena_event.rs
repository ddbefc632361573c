//! Domain events reflecting registry state mutations.
//!
//! Every state change emits an [`ArenaEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers and
//! optionally persisted to the PostgreSQL event log.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AccountId, ShapeId};

/// Domain event emitted after every state mutation.
///
/// All stake/price amounts are stored as `String` to preserve u128
/// precision when serialized to JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ArenaEvent {
    /// Emitted when a shape is purchased.
    ShapeCreated {
        /// Shape identifier.
        shape_id: ShapeId,
        /// Account that purchased the shape.
        owner: AccountId,
        /// Price paid (string-encoded u128).
        price: String,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a shape enters the random-fight pool.
    FightPoolEntered {
        /// Shape identifier.
        shape_id: ShapeId,
        /// Owner who entered the shape.
        owner: AccountId,
        /// Stake paid on entry (string-encoded u128).
        stake: String,
        /// Entry timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl ArenaEvent {
    /// Returns the shape ID associated with this event.
    #[must_use]
    pub fn shape_id(&self) -> ShapeId {
        match self {
            Self::ShapeCreated { shape_id, .. } | Self::FightPoolEntered { shape_id, .. } => {
                *shape_id
            }
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::ShapeCreated { .. } => "shape_created",
            Self::FightPoolEntered { .. } => "fight_pool_entered",
        }
    }

    /// Returns the event type in its declared form (e.g. `"ShapeCreated"`),
    /// the name external facades derive their lowerCamelCase keys from.
    #[must_use]
    pub const fn event_type_name(&self) -> &'static str {
        match self {
            Self::ShapeCreated { .. } => "ShapeCreated",
            Self::FightPoolEntered { .. } => "FightPoolEntered",
        }
    }
}
