//! Fight pool: the set of shapes awaiting a random match.
//!
//! [`FightPool`] tracks membership and the stake paid on entry. A shape
//! may be in the pool at most once; admission preconditions are enforced
//! by the service layer before [`FightPool::insert`] is reached, so a
//! duplicate insert here indicates a logic error upstream.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::ShapeId;
use crate::error::ArenaError;

/// Stake-tracking membership set for the random-fight pool.
///
/// Match resolution is owned by a component outside this service, so the
/// pool only ever grows for now; removal arrives with that component.
#[derive(Debug, Default)]
pub struct FightPool {
    stakes: RwLock<HashMap<ShapeId, u128>>,
}

impl FightPool {
    /// Creates an empty fight pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shape to the pool with the stake it paid.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::AlreadyAwaitingFight`] if the shape is
    /// already in the pool.
    pub async fn insert(&self, shape_id: ShapeId, stake: u128) -> Result<(), ArenaError> {
        let mut stakes = self.stakes.write().await;
        if stakes.contains_key(&shape_id) {
            return Err(ArenaError::AlreadyAwaitingFight(*shape_id.as_uuid()));
        }
        stakes.insert(shape_id, stake);
        Ok(())
    }

    /// Returns `true` if the shape is currently awaiting a match.
    pub async fn contains(&self, shape_id: ShapeId) -> bool {
        self.stakes.read().await.contains_key(&shape_id)
    }

    /// Returns the stake recorded for a shape, if it is in the pool.
    pub async fn stake_of(&self, shape_id: ShapeId) -> Option<u128> {
        self.stakes.read().await.get(&shape_id).copied()
    }

    /// Returns the IDs of all shapes currently in the pool.
    pub async fn members(&self) -> Vec<ShapeId> {
        self.stakes.read().await.keys().copied().collect()
    }

    /// Returns the number of shapes awaiting a match.
    pub async fn len(&self) -> usize {
        self.stakes.read().await.len()
    }

    /// Returns `true` if no shape is awaiting a match.
    pub async fn is_empty(&self) -> bool {
        self.stakes.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_and_query() {
        let pool = FightPool::new();
        let id = ShapeId::new();

        assert!(pool.is_empty().await);
        let result = pool.insert(id, 1_000).await;
        assert!(result.is_ok());

        assert!(pool.contains(id).await);
        assert_eq!(pool.stake_of(id).await, Some(1_000));
        assert_eq!(pool.len().await, 1);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let pool = FightPool::new();
        let id = ShapeId::new();

        let _ = pool.insert(id, 1_000).await;
        let second = pool.insert(id, 2_000).await;
        assert!(second.is_err());

        // Original stake untouched
        assert_eq!(pool.stake_of(id).await, Some(1_000));
        assert_eq!(pool.len().await, 1);
    }

    #[tokio::test]
    async fn distinct_shapes_coexist() {
        let pool = FightPool::new();
        let a = ShapeId::new();
        let b = ShapeId::new();

        assert!(pool.insert(a, 10).await.is_ok());
        assert!(pool.insert(b, 20).await.is_ok());
        assert_eq!(pool.len().await, 2);

        let mut members = pool.members().await;
        members.sort_by_key(|id| *id.as_uuid());
        let mut expected = vec![a, b];
        expected.sort_by_key(|id| *id.as_uuid());
        assert_eq!(members, expected);
    }

    #[tokio::test]
    async fn stake_of_absent_shape_is_none() {
        let pool = FightPool::new();
        assert_eq!(pool.stake_of(ShapeId::new()).await, None);
    }
}
