//! End-to-end tests driving the HTTP and WebSocket surfaces of a running
//! server instance.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio_test::assert_ok;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use shape_arena::api;
use shape_arena::app_state::AppState;
use shape_arena::domain::{AccountId, EventBus, FightPool, ShapeRegistry};
use shape_arena::service::ArenaService;
use shape_arena::ws::handler::ws_handler;

const SHAPE_COST: u128 = 10_000_000_000_000_000;
const RANDOM_FIGHT_COST: u128 = 1_000_000_000_000_000;

/// Binds the full router on an ephemeral port and serves it in the
/// background, returning the bound address.
async fn spawn_server() -> SocketAddr {
    let registry = Arc::new(ShapeRegistry::new());
    let fight_pool = Arc::new(FightPool::new());
    let event_bus = EventBus::new(1_000);
    let arena_service = Arc::new(ArenaService::new(
        registry,
        fight_pool,
        event_bus.clone(),
        AccountId::new(),
        SHAPE_COST,
        RANDOM_FIGHT_COST,
    ));
    let state = AppState {
        arena_service,
        event_bus,
    };

    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .with_state(state);

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind test listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("failed to read listener address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn buy_shape(client: &reqwest::Client, addr: SocketAddr, payment: &str) -> Value {
    let response = tokio_test::assert_ok!(
        client
            .post(format!("http://{addr}/api/v1/shapes"))
            .json(&json!({ "payment": payment }))
            .send()
            .await
    );
    assert_eq!(response.status(), 201);
    tokio_test::assert_ok!(response.json::<Value>().await)
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let response = tokio_test::assert_ok!(
        client.get(format!("http://{addr}/health")).send().await
    );
    assert_eq!(response.status(), 200);

    let body = tokio_test::assert_ok!(response.json::<Value>().await);
    assert_eq!(body.get("status"), Some(&json!("healthy")));
}

#[tokio::test]
async fn full_admission_flow_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let bought = buy_shape(&client, addr, &SHAPE_COST.to_string()).await;
    let Some(shape_id) = bought.get("shape_id").and_then(Value::as_str) else {
        panic!("purchase response missing shape_id");
    };
    let Some(owner) = bought.get("owner").and_then(Value::as_str) else {
        panic!("purchase response missing owner");
    };

    let entry_body = json!({ "caller": owner, "payment": RANDOM_FIGHT_COST.to_string() });

    // Probe first: admissible, nothing committed
    let probe = tokio_test::assert_ok!(
        client
            .post(format!("http://{addr}/api/v1/shapes/{shape_id}/fight-pool/probe"))
            .json(&entry_body)
            .send()
            .await
    );
    assert_eq!(probe.status(), 200);
    let pool = tokio_test::assert_ok!(
        client.get(format!("http://{addr}/api/v1/fight-pool")).send().await
    );
    let pool_body = tokio_test::assert_ok!(pool.json::<Value>().await);
    assert_eq!(pool_body.get("count"), Some(&json!(0)));

    // Commit the entry
    let entered = tokio_test::assert_ok!(
        client
            .post(format!("http://{addr}/api/v1/shapes/{shape_id}/fight-pool"))
            .json(&entry_body)
            .send()
            .await
    );
    assert_eq!(entered.status(), 200);

    // Second entry conflicts
    let again = tokio_test::assert_ok!(
        client
            .post(format!("http://{addr}/api/v1/shapes/{shape_id}/fight-pool"))
            .json(&entry_body)
            .send()
            .await
    );
    assert_eq!(again.status(), 409);

    // Listing reflects the pool state
    let list = tokio_test::assert_ok!(
        client.get(format!("http://{addr}/api/v1/shapes")).send().await
    );
    let list_body = tokio_test::assert_ok!(list.json::<Value>().await);
    let Some(data) = list_body.get("data").and_then(Value::as_array) else {
        panic!("list response missing data");
    };
    assert_eq!(data.len(), 1);
    assert_eq!(
        data.first().and_then(|s| s.get("awaiting_random_fight")),
        Some(&json!(true))
    );
}

#[tokio::test]
async fn admission_errors_map_to_http_statuses() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    // Underpaid purchase
    let underpaid = tokio_test::assert_ok!(
        client
            .post(format!("http://{addr}/api/v1/shapes"))
            .json(&json!({ "payment": "1" }))
            .send()
            .await
    );
    assert_eq!(underpaid.status(), 422);

    // Malformed payment
    let malformed = tokio_test::assert_ok!(
        client
            .post(format!("http://{addr}/api/v1/shapes"))
            .json(&json!({ "payment": "potato" }))
            .send()
            .await
    );
    assert_eq!(malformed.status(), 400);

    // Unknown shape
    let missing_id = uuid::Uuid::new_v4();
    let missing = tokio_test::assert_ok!(
        client
            .post(format!("http://{addr}/api/v1/shapes/{missing_id}/fight-pool"))
            .json(&json!({
                "caller": uuid::Uuid::new_v4(),
                "payment": RANDOM_FIGHT_COST.to_string(),
            }))
            .send()
            .await
    );
    assert_eq!(missing.status(), 404);

    // Non-owner caller
    let bought = buy_shape(&client, addr, &SHAPE_COST.to_string()).await;
    let Some(shape_id) = bought.get("shape_id").and_then(Value::as_str) else {
        panic!("purchase response missing shape_id");
    };
    let intruder = tokio_test::assert_ok!(
        client
            .post(format!("http://{addr}/api/v1/shapes/{shape_id}/fight-pool"))
            .json(&json!({
                "caller": uuid::Uuid::new_v4(),
                "payment": RANDOM_FIGHT_COST.to_string(),
            }))
            .send()
            .await
    );
    assert_eq!(intruder.status(), 403);
}

#[tokio::test]
async fn ws_subscriber_receives_facade_encoded_events() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let (mut socket, _) = tokio_test::assert_ok!(connect_async(format!("ws://{addr}/ws")).await);

    // Wildcard subscription
    let subscribe = json!({
        "id": "sub-1",
        "type": "command",
        "timestamp": chrono::Utc::now(),
        "payload": { "command": "subscribe", "shape_ids": ["*"] },
    });
    tokio_test::assert_ok!(socket.send(Message::text(subscribe.to_string())).await);

    let Ok(Some(Ok(ack))) =
        tokio::time::timeout(Duration::from_secs(5), socket.next()).await
    else {
        panic!("no subscription ack");
    };
    let Ok(ack_text) = ack.into_text() else {
        panic!("subscription ack was not text");
    };
    assert!(ack_text.contains("wildcard"));

    // A purchase over REST must arrive as a facade-encoded event
    let _ = buy_shape(&client, addr, &SHAPE_COST.to_string()).await;

    let Ok(Some(Ok(frame))) =
        tokio::time::timeout(Duration::from_secs(5), socket.next()).await
    else {
        panic!("no event frame");
    };
    let Ok(text) = frame.into_text() else {
        panic!("event frame was not text");
    };
    assert!(text.contains("shapeCreated"));
    assert!(text.contains("ShapeCreated"));
    assert!(text.contains("values"));
}
