//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` provides real-time event subscriptions
//! with per-shape filtering. Events are encoded with the facade
//! conventions in [`encoding`].

pub mod connection;
pub mod encoding;
pub mod handler;
pub mod messages;
pub mod subscription;
