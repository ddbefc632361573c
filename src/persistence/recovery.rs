//! Crash recovery: rebuilding in-memory state from snapshots and the
//! event log.
//!
//! Every domain event appends a row to the event log and refreshes the
//! affected shape's snapshot. On startup with persistence enabled,
//! [`restore`] loads the latest snapshot per shape and replays any events
//! recorded after the snapshot horizon, so the registry and fight pool
//! come back in the state they held when the service stopped.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use super::models::{ShapeSnapshot, StoredEvent};
use super::postgres::PostgresPersistence;
use crate::domain::{AccountId, FightPool, ShapeEntry, ShapeId, ShapeRegistry};
use crate::error::ArenaError;

/// Serializes a shape entry into the JSONB snapshot format.
///
/// All u128 amounts are stored as strings, matching the wire convention.
#[must_use]
pub fn snapshot_state(entry: &ShapeEntry) -> Value {
    json!({
        "shape_id": entry.shape_id,
        "owner": entry.owner,
        "awaiting_random_fight": entry.awaiting_random_fight,
        "stake": entry.stake.map(|s| s.to_string()),
        "purchase_price": entry.purchase_price.to_string(),
        "created_at": entry.created_at.to_rfc3339(),
        "last_modified_at": entry.last_modified_at.to_rfc3339(),
    })
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn u128_field(value: &Value, key: &str) -> Option<u128> {
    value
        .get(key)
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
}

fn time_field(value: &Value, key: &str) -> Option<DateTime<Utc>> {
    value
        .get(key)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

/// Rebuilds a [`ShapeEntry`] from a snapshot row. Returns `None` when the
/// stored state is malformed.
fn entry_from_snapshot(snapshot: &ShapeSnapshot) -> Option<ShapeEntry> {
    let state = &snapshot.state_json;
    let awaiting = state.get("awaiting_random_fight").and_then(Value::as_bool)?;
    Some(ShapeEntry {
        shape_id: ShapeId::from_uuid(snapshot.shape_id),
        owner: AccountId::from_uuid(snapshot.owner),
        awaiting_random_fight: awaiting,
        stake: u128_field(state, "stake"),
        purchase_price: u128_field(state, "purchase_price")?,
        created_at: time_field(state, "created_at")?,
        last_modified_at: time_field(state, "last_modified_at").unwrap_or_else(Utc::now),
    })
}

/// Applies a replayed event to the in-memory state.
///
/// Shapes the snapshots already cover are skipped; malformed payloads are
/// logged and skipped.
///
/// # Errors
///
/// Returns an insertion error if the event log is inconsistent with the
/// registry.
async fn apply_event(
    event: &StoredEvent,
    registry: &ShapeRegistry,
    fight_pool: &FightPool,
) -> Result<(), ArenaError> {
    let shape_id = ShapeId::from_uuid(event.shape_id);
    match event.event_type.as_str() {
        "shape_created" => {
            if registry.contains(shape_id).await {
                return Ok(());
            }
            let owner = str_field(&event.payload, "owner")
                .and_then(|s| s.parse::<Uuid>().ok());
            let price = u128_field(&event.payload, "price");
            let (Some(owner), Some(price)) = (owner, price) else {
                tracing::warn!(%shape_id, "skipping malformed shape_created payload");
                return Ok(());
            };
            let mut entry = ShapeEntry::new(shape_id, AccountId::from_uuid(owner), price);
            entry.created_at = event.created_at;
            entry.last_modified_at = event.created_at;
            registry.insert(entry).await?;
        }
        "fight_pool_entered" => {
            let Some(stake) = u128_field(&event.payload, "stake") else {
                tracing::warn!(%shape_id, "skipping malformed fight_pool_entered payload");
                return Ok(());
            };
            let Ok(entry_lock) = registry.get(shape_id).await else {
                tracing::warn!(%shape_id, "fight_pool_entered for unknown shape in event log");
                return Ok(());
            };
            let mut entry = entry_lock.write().await;
            if entry.awaiting_random_fight {
                return Ok(());
            }
            fight_pool.insert(shape_id, stake).await?;
            entry.awaiting_random_fight = true;
            entry.stake = Some(stake);
            entry.last_modified_at = event.created_at;
        }
        other => {
            tracing::warn!(event_type = other, "unknown event type in event log");
        }
    }
    Ok(())
}

/// Restores the registry and fight pool from persisted state.
///
/// Loads the latest snapshot per shape, reinserts them in creation order
/// so shape listings keep their ordering, then replays events recorded
/// after the snapshot horizon. Returns the number of shapes restored.
///
/// # Errors
///
/// Returns [`ArenaError::PersistenceError`] if the snapshot or event
/// queries fail, or an insertion error if the stored state is
/// inconsistent.
pub async fn restore(
    store: &PostgresPersistence,
    registry: &ShapeRegistry,
    fight_pool: &FightPool,
) -> Result<usize, ArenaError> {
    let snapshots = store.load_latest_snapshots().await?;
    let mut horizon = DateTime::<Utc>::UNIX_EPOCH;
    let mut entries = Vec::with_capacity(snapshots.len());
    for snapshot in &snapshots {
        horizon = horizon.max(snapshot.snapshot_at);
        if let Some(entry) = entry_from_snapshot(snapshot) {
            entries.push(entry);
        } else {
            tracing::warn!(shape_id = %snapshot.shape_id, "skipping malformed snapshot");
        }
    }
    entries.sort_by_key(|e| e.created_at);

    for entry in entries {
        let awaiting = entry.awaiting_random_fight;
        let stake = entry.stake;
        let shape_id = registry.insert(entry).await?;
        if awaiting && let Some(stake) = stake {
            fight_pool.insert(shape_id, stake).await?;
        }
    }

    // Events newer than the snapshot horizon were not folded into any
    // snapshot row; replay them on top.
    for event in store.load_events_after(horizon, None).await? {
        apply_event(&event, registry, fight_pool).await?;
    }

    Ok(registry.len().await)
}
