//! shape-arena server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use shape_arena::api;
use shape_arena::app_state::AppState;
use shape_arena::config::ArenaConfig;
use shape_arena::domain::{AccountId, EventBus, FightPool, ShapeRegistry};
use shape_arena::persistence::postgres::PostgresPersistence;
use shape_arena::persistence::recovery;
use shape_arena::service::ArenaService;
use shape_arena::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ArenaConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting shape-arena");

    // The manager is fixed for the lifetime of the service, like the
    // deployer of the original registry.
    let manager = config.manager.unwrap_or_else(AccountId::new);
    tracing::info!(%manager, "registry manager");

    // Build domain layer
    let registry = Arc::new(ShapeRegistry::new());
    let fight_pool = Arc::new(FightPool::new());
    let event_bus = EventBus::new(config.event_bus_capacity);

    // Optional persistence: restore prior state, then log new events
    if config.persistence_enabled {
        wire_persistence(&config, &event_bus, &registry, &fight_pool).await;
    }

    // Build service layer
    let arena_service = Arc::new(ArenaService::new(
        Arc::clone(&registry),
        Arc::clone(&fight_pool),
        event_bus.clone(),
        manager,
        config.shape_cost,
        config.random_fight_cost,
    ));

    // Build application state
    let app_state = AppState {
        arena_service,
        event_bus,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Connects to PostgreSQL, restores the registry and fight pool from the
/// latest snapshots plus newer logged events, and spawns a task that
/// appends every domain event to the log and refreshes the affected
/// shape's snapshot. An unreachable database downgrades to a warning so
/// the registry stays available.
async fn wire_persistence(
    config: &ArenaConfig,
    event_bus: &EventBus,
    registry: &Arc<ShapeRegistry>,
    fight_pool: &Arc<FightPool>,
) {
    let options = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs));

    match options.connect(&config.database_url).await {
        Ok(pg_pool) => {
            let store = PostgresPersistence::new(pg_pool);

            match recovery::restore(&store, registry, fight_pool).await {
                Ok(restored) => tracing::info!(restored, "registry state restored"),
                Err(e) => tracing::warn!(error = %e, "state restore failed; starting empty"),
            }

            let mut rx = event_bus.subscribe();
            let registry = Arc::clone(registry);
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => {
                            let shape_id = event.shape_id();
                            let payload = serde_json::to_value(&event).unwrap_or_default();
                            let result = store
                                .save_event(*shape_id.as_uuid(), event.event_type_str(), &payload)
                                .await;
                            if let Err(e) = result {
                                tracing::warn!(error = %e, "failed to append event to log");
                            }

                            if let Ok(entry_lock) = registry.get(shape_id).await {
                                let entry = entry_lock.read().await;
                                let state = recovery::snapshot_state(&entry);
                                let owner = *entry.owner.as_uuid();
                                drop(entry);
                                if let Err(e) = store
                                    .save_snapshot(*shape_id.as_uuid(), owner, &state)
                                    .await
                                {
                                    tracing::warn!(error = %e, "failed to refresh shape snapshot");
                                }
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            tracing::warn!(lagged = n, "event log lagged behind event bus");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            });
            tracing::info!("event log persistence enabled");
        }
        Err(e) => {
            tracing::warn!(error = %e, "persistence enabled but database unreachable; continuing without event log");
        }
    }
}
