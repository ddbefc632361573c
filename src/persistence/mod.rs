//! Persistence layer: PostgreSQL event log and shape snapshots.
//!
//! Provides durable storage for registry events and shape state
//! snapshots, plus the startup [`recovery`] path that rebuilds in-memory
//! state from them. The concrete implementation uses `sqlx::PgPool` for
//! async PostgreSQL access; the layer is optional and toggled by
//! `PERSISTENCE_ENABLED`.

pub mod models;
pub mod postgres;
pub mod recovery;
