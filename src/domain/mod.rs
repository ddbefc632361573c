//! Domain layer: core types, shape registry, fight pool, and event system.
//!
//! This module contains the server-side domain model including shape and
//! account identity, shape entries with ownership state, the fight pool
//! with stake tracking, the event bus for broadcasting state changes, and
//! the shape registry for concurrent append-only storage.

pub mod account_id;
pub mod arena_event;
pub mod event_bus;
pub mod fight_pool;
pub mod shape_entry;
pub mod shape_id;
pub mod shape_registry;

pub use account_id::AccountId;
pub use arena_event::ArenaEvent;
pub use event_bus::EventBus;
pub use fight_pool::FightPool;
pub use shape_entry::ShapeEntry;
pub use shape_id::ShapeId;
pub use shape_registry::ShapeRegistry;
