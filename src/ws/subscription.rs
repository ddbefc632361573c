//! Per-connection subscription manager.
//!
//! Tracks which shape IDs a WebSocket client is subscribed to and
//! provides server-side event filtering.

use std::collections::HashSet;

use crate::domain::ShapeId;

/// Manages the set of shape subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed shape IDs. If `subscribe_all` is true, this set is ignored.
    shape_ids: HashSet<ShapeId>,
    /// Whether the client subscribes to all shapes (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds shape IDs to the subscription set. `"*"` enables the wildcard.
    pub fn subscribe(&mut self, ids: &[ShapeId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        for id in ids {
            self.shape_ids.insert(*id);
        }
    }

    /// Removes shape IDs from the subscription set.
    pub fn unsubscribe(&mut self, ids: &[ShapeId]) {
        for id in ids {
            self.shape_ids.remove(id);
        }
    }

    /// Returns `true` if the given shape ID matches the subscription filter.
    #[must_use]
    pub fn matches(&self, shape_id: ShapeId) -> bool {
        self.subscribe_all || self.shape_ids.contains(&shape_id)
    }

    /// Returns the number of explicitly subscribed shape IDs.
    #[must_use]
    pub fn count(&self) -> usize {
        self.shape_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(ShapeId::new()));
    }

    #[test]
    fn subscribe_specific_shape() {
        let mut mgr = SubscriptionManager::new();
        let id = ShapeId::new();
        mgr.subscribe(&[id], false);
        assert!(mgr.matches(id));
        assert!(!mgr.matches(ShapeId::new()));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(ShapeId::new()));
        assert!(mgr.matches(ShapeId::new()));
    }

    #[test]
    fn unsubscribe_removes_shape() {
        let mut mgr = SubscriptionManager::new();
        let id = ShapeId::new();
        mgr.subscribe(&[id], false);
        assert!(mgr.matches(id));
        mgr.unsubscribe(&[id]);
        assert!(!mgr.matches(id));
    }

    #[test]
    fn count_tracks_explicit() {
        let mut mgr = SubscriptionManager::new();
        assert_eq!(mgr.count(), 0);
        mgr.subscribe(&[ShapeId::new(), ShapeId::new()], false);
        assert_eq!(mgr.count(), 2);
    }
}
