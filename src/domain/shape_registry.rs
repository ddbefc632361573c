//! Concurrent shape storage with per-shape fine-grained locking.
//!
//! [`ShapeRegistry`] stores every shape ever purchased in a `HashMap`
//! where each entry is individually protected by a
//! [`tokio::sync::RwLock`], alongside an insertion-order list. This
//! allows concurrent reads on the same shape and concurrent writes on
//! different shapes, while `ids()` preserves creation order.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::shape_entry::{ShapeEntry, ShapeSummary};
use super::{AccountId, ShapeId};
use crate::error::ArenaError;

/// Inner table guarded by the registry's outer lock.
#[derive(Debug, Default)]
struct ShapeTable {
    entries: HashMap<ShapeId, Arc<RwLock<ShapeEntry>>>,
    // Creation order. The registry is append-only, so this only grows.
    order: Vec<ShapeId>,
}

/// Central append-only store for all shapes.
///
/// Uses a `RwLock<HashMap<...>>` for the outer map and per-entry
/// `Arc<RwLock<ShapeEntry>>` for fine-grained per-shape locking.
///
/// # Concurrency
///
/// - Multiple tasks may read the same shape concurrently.
/// - Writes to different shapes are concurrent.
/// - Writes to the same shape are serialized.
///
/// There is no removal operation: shapes persist for the lifetime of the
/// registry.
#[derive(Debug)]
pub struct ShapeRegistry {
    shapes: RwLock<ShapeTable>,
}

impl ShapeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shapes: RwLock::new(ShapeTable::default()),
        }
    }

    /// Appends a new shape entry to the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidRequest`] if a shape with the same ID
    /// already exists (should never happen with UUID v4).
    pub async fn insert(&self, entry: ShapeEntry) -> Result<ShapeId, ArenaError> {
        let shape_id = entry.shape_id;
        let mut table = self.shapes.write().await;
        if table.entries.contains_key(&shape_id) {
            return Err(ArenaError::InvalidRequest(format!(
                "shape {shape_id} already exists"
            )));
        }
        table.entries.insert(shape_id, Arc::new(RwLock::new(entry)));
        table.order.push(shape_id);
        Ok(shape_id)
    }

    /// Returns a shared reference to the shape entry behind a per-shape lock.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::ShapeNotFound`] if no shape with the given ID
    /// exists.
    pub async fn get(&self, shape_id: ShapeId) -> Result<Arc<RwLock<ShapeEntry>>, ArenaError> {
        let table = self.shapes.read().await;
        table
            .entries
            .get(&shape_id)
            .cloned()
            .ok_or(ArenaError::ShapeNotFound(*shape_id.as_uuid()))
    }

    /// Returns `true` if the registry contains the given shape.
    pub async fn contains(&self, shape_id: ShapeId) -> bool {
        self.shapes.read().await.entries.contains_key(&shape_id)
    }

    /// Returns all shape IDs in creation order.
    pub async fn ids(&self) -> Vec<ShapeId> {
        self.shapes.read().await.order.clone()
    }

    /// Returns summaries of all shapes in creation order, optionally
    /// filtered by owner.
    pub async fn list(&self, owner_filter: Option<AccountId>) -> Vec<ShapeSummary> {
        let table = self.shapes.read().await;
        let mut summaries = Vec::with_capacity(table.order.len());
        for shape_id in &table.order {
            let Some(entry_lock) = table.entries.get(shape_id) else {
                continue;
            };
            let entry = entry_lock.read().await;
            if let Some(filter) = owner_filter
                && entry.owner != filter
            {
                continue;
            }
            summaries.push(ShapeSummary::from(&*entry));
        }
        summaries
    }

    /// Returns the number of shapes in the registry.
    pub async fn len(&self) -> usize {
        self.shapes.read().await.order.len()
    }

    /// Returns `true` if the registry contains no shapes.
    pub async fn is_empty(&self) -> bool {
        self.shapes.read().await.order.is_empty()
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
