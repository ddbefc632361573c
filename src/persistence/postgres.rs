//! PostgreSQL implementation of the persistence layer.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{ShapeSnapshot, StoredEvent};
use crate::error::ArenaError;

/// PostgreSQL-backed persistence layer using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    /// Creates a new persistence layer with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends an event to the event log.
    ///
    /// # Errors
    ///
    /// Returns a [`ArenaError::PersistenceError`] on database failure.
    pub async fn save_event(
        &self,
        shape_id: Uuid,
        event_type: &str,
        payload: &serde_json::Value,
    ) -> Result<i64, ArenaError> {
        let row = sqlx::query_scalar::<_, i64>(
            "INSERT INTO events (shape_id, event_type, payload) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(shape_id)
        .bind(event_type)
        .bind(payload)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ArenaError::PersistenceError(e.to_string()))?;

        Ok(row)
    }

    /// Saves a shape state snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`ArenaError::PersistenceError`] on database failure.
    pub async fn save_snapshot(
        &self,
        shape_id: Uuid,
        owner: Uuid,
        state_json: &serde_json::Value,
    ) -> Result<i64, ArenaError> {
        let row = sqlx::query_scalar::<_, i64>(
            "INSERT INTO shape_snapshots (shape_id, owner, state_json) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(shape_id)
        .bind(owner)
        .bind(state_json)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ArenaError::PersistenceError(e.to_string()))?;

        Ok(row)
    }

    /// Loads the latest snapshot for each shape using `DISTINCT ON`.
    ///
    /// # Errors
    ///
    /// Returns a [`ArenaError::PersistenceError`] on database failure.
    pub async fn load_latest_snapshots(&self) -> Result<Vec<ShapeSnapshot>, ArenaError> {
        let rows = sqlx::query_as::<_, (i64, Uuid, Uuid, serde_json::Value, DateTime<Utc>)>(
            "SELECT DISTINCT ON (shape_id) id, shape_id, owner, state_json, snapshot_at \
             FROM shape_snapshots ORDER BY shape_id, snapshot_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ArenaError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, shape_id, owner, state_json, snapshot_at)| ShapeSnapshot {
                id,
                shape_id,
                owner,
                state_json,
                snapshot_at,
            })
            .collect())
    }

    /// Loads events after the given timestamp, optionally filtered by shape ID.
    ///
    /// # Errors
    ///
    /// Returns a [`ArenaError::PersistenceError`] on database failure.
    pub async fn load_events_after(
        &self,
        after: DateTime<Utc>,
        shape_id: Option<Uuid>,
    ) -> Result<Vec<StoredEvent>, ArenaError> {
        let rows = if let Some(sid) = shape_id {
            sqlx::query_as::<_, (i64, Uuid, String, serde_json::Value, DateTime<Utc>)>(
                "SELECT id, shape_id, event_type, payload, created_at FROM events \
                 WHERE created_at > $1 AND shape_id = $2 ORDER BY created_at ASC",
            )
            .bind(after)
            .bind(sid)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, (i64, Uuid, String, serde_json::Value, DateTime<Utc>)>(
                "SELECT id, shape_id, event_type, payload, created_at FROM events \
                 WHERE created_at > $1 ORDER BY created_at ASC",
            )
            .bind(after)
            .fetch_all(&self.pool)
            .await
        }
        .map_err(|e| ArenaError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, shape_id, event_type, payload, created_at)| StoredEvent {
                    id,
                    shape_id,
                    event_type,
                    payload,
                    created_at,
                },
            )
            .collect())
    }
}
