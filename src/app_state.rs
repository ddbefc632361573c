//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::ArenaService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Arena service for all business logic.
    pub arena_service: Arc<ArenaService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}
