//! Arena service: orchestrates shape purchases and fight-pool admission.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::shape_entry::{ShapeEntry, ShapeSummary};
use crate::domain::{AccountId, ArenaEvent, EventBus, FightPool, ShapeId, ShapeRegistry};
use crate::error::ArenaError;

/// Orchestration layer for all registry operations.
///
/// Stateless coordinator: owns references to [`ShapeRegistry`] and
/// [`FightPool`] for state and [`EventBus`] for event emission. Every
/// mutation method follows the pattern: acquire the shape's write lock →
/// check every precondition → mutate → emit events → return result. A
/// failed precondition returns before any mutation, so callers observe
/// all-or-nothing semantics.
///
/// The manager identity and the two protocol minimums (`shape_cost`,
/// `random_fight_cost`) are fixed at construction time.
#[derive(Debug, Clone)]
pub struct ArenaService {
    registry: Arc<ShapeRegistry>,
    fight_pool: Arc<FightPool>,
    event_bus: EventBus,
    manager: AccountId,
    shape_cost: u128,
    random_fight_cost: u128,
}

impl ArenaService {
    /// Creates a new `ArenaService` managed by the given account.
    #[must_use]
    pub fn new(
        registry: Arc<ShapeRegistry>,
        fight_pool: Arc<FightPool>,
        event_bus: EventBus,
        manager: AccountId,
        shape_cost: u128,
        random_fight_cost: u128,
    ) -> Self {
        Self {
            registry,
            fight_pool,
            event_bus,
            manager,
            shape_cost,
            random_fight_cost,
        }
    }

    /// Returns the account that constructed the registry.
    #[must_use]
    pub const fn manager(&self) -> AccountId {
        self.manager
    }

    /// Returns the minimum purchase price for a shape.
    #[must_use]
    pub const fn shape_cost(&self) -> u128 {
        self.shape_cost
    }

    /// Returns the minimum stake for entering the random-fight pool.
    #[must_use]
    pub const fn random_fight_cost(&self) -> u128 {
        self.random_fight_cost
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`ShapeRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<ShapeRegistry> {
        &self.registry
    }

    /// Returns a reference to the inner [`FightPool`].
    #[must_use]
    pub fn fight_pool(&self) -> &Arc<FightPool> {
        &self.fight_pool
    }

    /// Purchases a new shape for `buyer`.
    ///
    /// The new shape starts outside the fight pool and is appended to the
    /// registry's creation-order list.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InsufficientPayment`] if `payment` is below
    /// the shape cost, or an insertion error from the registry.
    pub async fn buy_shape(
        &self,
        buyer: AccountId,
        payment: u128,
    ) -> Result<ShapeId, ArenaError> {
        if payment < self.shape_cost {
            return Err(ArenaError::InsufficientPayment {
                required: self.shape_cost,
                provided: payment,
            });
        }

        let shape_id = ShapeId::new();
        let entry = ShapeEntry::new(shape_id, buyer, payment);
        self.registry.insert(entry).await?;

        let _ = self.event_bus.publish(ArenaEvent::ShapeCreated {
            shape_id,
            owner: buyer,
            price: payment.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(%shape_id, %buyer, "shape purchased");
        Ok(shape_id)
    }

    /// Enters a shape into the random-fight pool.
    ///
    /// Preconditions, checked under the shape's write lock before any
    /// mutation:
    ///
    /// 1. the shape exists in the registry;
    /// 2. `caller` is the shape's owner;
    /// 3. `payment` is at least the random-fight cost;
    /// 4. the shape is not already awaiting a fight.
    ///
    /// On success the shape's flag is set, the stake recorded, the shape
    /// added to the pool, and a [`ArenaEvent::FightPoolEntered`] emitted.
    ///
    /// Entries for distinct shapes never contend: each shape is guarded by
    /// its own lock, so concurrent admissions proceed in parallel.
    ///
    /// # Errors
    ///
    /// Returns the corresponding [`ArenaError`] for the first violated
    /// precondition, leaving all state unchanged.
    pub async fn enter_random_fight_pool(
        &self,
        shape_id: ShapeId,
        caller: AccountId,
        payment: u128,
    ) -> Result<(), ArenaError> {
        let entry_lock = self.registry.get(shape_id).await?;
        let mut entry = entry_lock.write().await;

        self.check_admission(&entry, caller, payment)?;

        // Pool insert before flag mutation: if it fails the entry is
        // untouched and the call stays all-or-nothing.
        self.fight_pool.insert(shape_id, payment).await?;

        entry.awaiting_random_fight = true;
        entry.stake = Some(payment);
        entry.last_modified_at = Utc::now();

        drop(entry);

        let _ = self.event_bus.publish(ArenaEvent::FightPoolEntered {
            shape_id,
            owner: caller,
            stake: payment.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(%shape_id, %caller, stake = payment, "shape entered fight pool");
        Ok(())
    }

    /// Read-only probe of [`Self::enter_random_fight_pool`].
    ///
    /// Performs exactly the same precondition checks against a consistent
    /// snapshot of the shape and fails identically, but never mutates any
    /// state and never records a stake.
    ///
    /// # Errors
    ///
    /// Returns the same [`ArenaError`] the committing variant would return
    /// for the given arguments.
    pub async fn probe_enter_random_fight_pool(
        &self,
        shape_id: ShapeId,
        caller: AccountId,
        payment: u128,
    ) -> Result<(), ArenaError> {
        let entry_lock = self.registry.get(shape_id).await?;
        let entry = entry_lock.read().await;
        self.check_admission(&entry, caller, payment)
    }

    /// Admission preconditions shared by the committing call and the probe.
    fn check_admission(
        &self,
        entry: &ShapeEntry,
        caller: AccountId,
        payment: u128,
    ) -> Result<(), ArenaError> {
        if entry.owner != caller {
            return Err(ArenaError::NotShapeOwner(*entry.shape_id.as_uuid()));
        }
        if payment < self.random_fight_cost {
            return Err(ArenaError::InsufficientPayment {
                required: self.random_fight_cost,
                provided: payment,
            });
        }
        if entry.awaiting_random_fight {
            return Err(ArenaError::AlreadyAwaitingFight(*entry.shape_id.as_uuid()));
        }
        Ok(())
    }

    /// Returns all shape IDs in creation order.
    pub async fn shape_ids(&self) -> Vec<ShapeId> {
        self.registry.ids().await
    }

    /// Returns summaries of all shapes in creation order, optionally
    /// filtered by owner.
    pub async fn list_shapes(&self, owner_filter: Option<AccountId>) -> Vec<ShapeSummary> {
        self.registry.list(owner_filter).await
    }
}
