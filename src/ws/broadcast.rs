use axum::extract::ws::Message;
use serde_json::Value;

use super::protocol::ServerFrame;
use super::{ConnectionId, ConnectionRegistry};

/// Serialize an event frame into a WebSocket text message.
/// Returns `None` if serialization fails, which for JSON values cannot
/// happen in practice; the broadcast is simply skipped.
fn encode_frame(event: &str, data: &Value) -> Option<Message> {
    let frame = ServerFrame { event, data };
    let text = serde_json::to_string(&frame).ok()?;
    Some(Message::Text(text.into()))
}

/// Broadcast an event to all connected clients, sender included.
/// Delivery is fire-and-forget: a recipient whose channel is mid-close
/// silently drops the message.
pub fn broadcast_to_all(registry: &ConnectionRegistry, event: &str, data: &Value) {
    let Some(msg) = encode_frame(event, data) else {
        return;
    };
    for entry in registry.iter() {
        let _ = entry.value().send(msg.clone());
    }
}

/// Broadcast an event to every connected client except `sender`.
pub fn broadcast_to_others(
    registry: &ConnectionRegistry,
    sender: ConnectionId,
    event: &str,
    data: &Value,
) {
    let Some(msg) = encode_frame(event, data) else {
        return;
    };
    for entry in registry.iter() {
        if *entry.key() == sender {
            continue;
        }
        let _ = entry.value().send(msg.clone());
    }
}
