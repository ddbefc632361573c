//! Service layer: orchestration of domain operations.

pub mod arena_service;

pub use arena_service::ArenaService;
