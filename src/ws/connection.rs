//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered events.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::encoding::encode_event;
use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::{ArenaEvent, ShapeId};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<ArenaEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(arena_event) => {
                        if subs.matches(arena_event.shape_id()) {
                            let msg = WsMessage {
                                id: uuid::Uuid::new_v4().to_string(),
                                msg_type: WsMessageType::Event,
                                timestamp: chrono::Utc::now(),
                                payload: encode_event(&arena_event),
                            };
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON response.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        let err = WsMessage {
            id: String::new(),
            msg_type: WsMessageType::Error,
            timestamp: chrono::Utc::now(),
            payload: serde_json::json!({
                "code": 400,
                "message": "malformed JSON"
            }),
        };
        return serde_json::to_string(&err).ok();
    };

    match serde_json::from_value::<WsCommand>(msg.payload.clone()) {
        Ok(WsCommand::Subscribe { shape_ids }) => {
            let (ids, wildcard) = parse_shape_ids(&shape_ids);
            subs.subscribe(&ids, wildcard);
            let response = WsMessage {
                id: msg.id,
                msg_type: WsMessageType::Response,
                timestamp: chrono::Utc::now(),
                payload: serde_json::json!({
                    "subscribed": ids.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            };
            serde_json::to_string(&response).ok()
        }
        Ok(WsCommand::Unsubscribe { shape_ids }) => {
            let (ids, _) = parse_shape_ids(&shape_ids);
            subs.unsubscribe(&ids);
            let response = WsMessage {
                id: msg.id,
                msg_type: WsMessageType::Response,
                timestamp: chrono::Utc::now(),
                payload: serde_json::json!({
                    "unsubscribed": ids.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
                    "remaining_count": subs.count(),
                }),
            };
            serde_json::to_string(&response).ok()
        }
        Err(_) => {
            let err = WsMessage {
                id: msg.id,
                msg_type: WsMessageType::Error,
                timestamp: chrono::Utc::now(),
                payload: serde_json::json!({
                    "code": 404,
                    "message": "unknown command"
                }),
            };
            serde_json::to_string(&err).ok()
        }
    }
}

/// Resolves the raw `shape_ids` strings of a command into [`ShapeId`]s,
/// reporting whether the `"*"` wildcard was present. Unparseable entries
/// are dropped.
fn parse_shape_ids(raw: &[String]) -> (Vec<ShapeId>, bool) {
    let mut ids = Vec::new();
    let mut wildcard = false;
    for s in raw {
        if s == "*" {
            wildcard = true;
        } else if let Ok(uuid) = s.parse::<uuid::Uuid>() {
            ids.push(ShapeId::from_uuid(uuid));
        }
    }
    (ids, wildcard)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn command(payload: serde_json::Value) -> String {
        let msg = WsMessage {
            id: "req-1".to_string(),
            msg_type: WsMessageType::Command,
            timestamp: chrono::Utc::now(),
            payload,
        };
        serde_json::to_string(&msg).unwrap_or_default()
    }

    #[test]
    fn malformed_json_yields_error_response() {
        let mut subs = SubscriptionManager::new();
        let response = handle_text_message("not json", &mut subs);
        let Some(response) = response else {
            panic!("expected a response");
        };
        assert!(response.contains("malformed JSON"));
    }

    #[test]
    fn subscribe_command_registers_ids() {
        let mut subs = SubscriptionManager::new();
        let id = ShapeId::new();
        let text = command(serde_json::json!({
            "command": "subscribe",
            "shape_ids": [id.to_string()],
        }));

        let response = handle_text_message(&text, &mut subs);
        assert!(response.is_some());
        assert!(subs.matches(id));
        assert_eq!(subs.count(), 1);
    }

    #[test]
    fn wildcard_subscribe_sets_flag() {
        let mut subs = SubscriptionManager::new();
        let text = command(serde_json::json!({
            "command": "subscribe",
            "shape_ids": ["*"],
        }));

        let _ = handle_text_message(&text, &mut subs);
        assert!(subs.is_subscribed_all());
        assert!(subs.matches(ShapeId::new()));
    }

    #[test]
    fn unsubscribe_command_removes_ids() {
        let mut subs = SubscriptionManager::new();
        let id = ShapeId::new();
        subs.subscribe(&[id], false);

        let text = command(serde_json::json!({
            "command": "unsubscribe",
            "shape_ids": [id.to_string()],
        }));
        let _ = handle_text_message(&text, &mut subs);
        assert!(!subs.matches(id));
    }

    #[test]
    fn payload_without_command_is_rejected() {
        let mut subs = SubscriptionManager::new();
        let text = command(serde_json::json!({ "shape_ids": ["*"] }));
        let response = handle_text_message(&text, &mut subs);
        let Some(response) = response else {
            panic!("expected a response");
        };
        assert!(response.contains("unknown command"));
        assert!(!subs.is_subscribed_all());
    }

    #[test]
    fn parse_shape_ids_extracts_wildcard_and_uuids() {
        let id = ShapeId::new();
        let raw = vec!["*".to_string(), id.to_string(), "not-a-uuid".to_string()];
        let (ids, wildcard) = parse_shape_ids(&raw);
        assert!(wildcard);
        assert_eq!(ids, vec![id]);
    }

    #[test]
    fn unknown_command_yields_error() {
        let mut subs = SubscriptionManager::new();
        let text = command(serde_json::json!({ "command": "fight" }));
        let response = handle_text_message(&text, &mut subs);
        let Some(response) = response else {
            panic!("expected a response");
        };
        assert!(response.contains("unknown command"));
    }
}
