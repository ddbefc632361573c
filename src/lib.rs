//! # shape-arena
//!
//! REST API and WebSocket service for the CryptoShape fight-pool
//! admission registry.
//!
//! The service owns an append-only registry of player-owned shapes and
//! gates entry into the random-fight pool: only a shape's owner may enter
//! it, a minimum stake must be attached, and a shape can be in the pool
//! at most once. Every admission call is atomic — precondition checks and
//! the state mutation happen under the shape's own lock, so a failed call
//! leaves no trace.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── ArenaService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── ShapeRegistry + FightPool (domain/)
//!     │
//!     └── PostgreSQL Persistence (optional)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
