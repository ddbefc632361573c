//! Event encoding conventions for client-facing facades.
//!
//! Client facades key event handlers by a lowerCamelCase version of the
//! event type name and consume events as a `{type, values}` structure
//! where `values` holds the positional fields in declared order, with
//! named duplicates discarded.

use serde_json::{Value, json};

use crate::domain::ArenaEvent;

/// Converts an event type name to its facade key: the first character is
/// lowercased, the rest is untouched (`"PotatoEaten"` → `"potatoEaten"`).
#[must_use]
pub fn event_type_key(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts an event into the `{type, values}` structure client facades
/// consume: `type` is the declared event name and `values` the positional
/// field sequence.
#[must_use]
pub fn event_to_json(event: &ArenaEvent) -> Value {
    let values: Vec<Value> = match event {
        ArenaEvent::ShapeCreated {
            shape_id,
            owner,
            price,
            ..
        } => vec![
            json!(shape_id.to_string()),
            json!(owner.to_string()),
            json!(price),
        ],
        ArenaEvent::FightPoolEntered {
            shape_id,
            owner,
            stake,
            ..
        } => vec![
            json!(shape_id.to_string()),
            json!(owner.to_string()),
            json!(stake),
        ],
    };

    json!({
        "type": event.event_type_name(),
        "values": values,
    })
}

/// Full WebSocket event payload: the facade key plus the `{type, values}`
/// structure.
#[must_use]
pub fn encode_event(event: &ArenaEvent) -> Value {
    let mut payload = event_to_json(event);
    if let Value::Object(map) = &mut payload {
        map.insert(
            "key".to_string(),
            json!(event_type_key(event.event_type_name())),
        );
    }
    payload
}
