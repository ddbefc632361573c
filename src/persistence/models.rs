//! Database models for events and snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored event row from the `events` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEvent {
    /// Auto-increment row ID.
    pub id: i64,
    /// Shape that generated the event.
    pub shape_id: Uuid,
    /// Event type discriminator (e.g. `"fight_pool_entered"`).
    pub event_type: String,
    /// JSONB payload with event-specific data.
    pub payload: serde_json::Value,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A shape snapshot row from the `shape_snapshots` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    /// Auto-increment row ID.
    pub id: i64,
    /// Shape that was snapshotted.
    pub shape_id: Uuid,
    /// Owning account.
    pub owner: Uuid,
    /// Full shape state as JSONB (flag, stake, timestamps).
    pub state_json: serde_json::Value,
    /// Snapshot timestamp.
    pub snapshot_at: DateTime<Utc>,
}
