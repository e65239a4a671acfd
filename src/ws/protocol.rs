//! Wire protocol and event routing.
//!
//! Frames are JSON text messages of the shape `{"event": <name>, "data": <value>}`.
//! The relay never inspects or transforms `data`; it only routes by event name:
//!
//! - `join_user`    -> roster update, presence snapshot to all, announcement
//!   relayed as `message` to everyone except the sender
//! - `message`      -> relayed verbatim to all clients, sender included
//! - `typing`       -> relayed verbatim to everyone except the sender
//! - `voice_message`-> relayed to all clients under the name `receive_voice`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::presence;
use crate::state::AppState;
use crate::ws::broadcast::{broadcast_to_all, broadcast_to_others};
use crate::ws::ConnectionId;

// Client -> server event names.
pub const EVENT_JOIN_USER: &str = "join_user";
pub const EVENT_MESSAGE: &str = "message";
pub const EVENT_TYPING: &str = "typing";
pub const EVENT_VOICE_MESSAGE: &str = "voice_message";

// Server -> client event names.
pub const EVENT_ONLINE_USERS_LIST: &str = "online_users_list";
pub const EVENT_RECEIVE_VOICE: &str = "receive_voice";

/// Inbound frame. `data` stays an opaque JSON value: the relay is
/// pass-through by design and accepts any shape without validation.
#[derive(Debug, Deserialize)]
pub struct ClientFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// Outbound frame, borrowed so broadcasts serialize once per fan-out.
#[derive(Debug, Serialize)]
pub struct ServerFrame<'a> {
    pub event: &'a str,
    pub data: &'a Value,
}

/// Handle one inbound text frame from `conn_id`.
/// Undecodable frames are logged and dropped; the connection stays open.
pub fn handle_text_frame(text: &str, conn_id: ConnectionId, state: &AppState) {
    let frame: ClientFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(conn_id = %conn_id, error = %e, "Undecodable frame, dropping");
            return;
        }
    };

    match frame.event.as_str() {
        EVENT_JOIN_USER => handle_join(conn_id, state, &frame.data),
        EVENT_MESSAGE => {
            // Relayed to everyone including the sender, even when the sender
            // never joined: the display name rides in the payload itself.
            broadcast_to_all(&state.connections, EVENT_MESSAGE, &frame.data);
        }
        EVENT_TYPING => {
            broadcast_to_others(&state.connections, conn_id, EVENT_TYPING, &frame.data);
        }
        EVENT_VOICE_MESSAGE => {
            broadcast_to_all(&state.connections, EVENT_RECEIVE_VOICE, &frame.data);
        }
        other => {
            tracing::debug!(conn_id = %conn_id, event = %other, "Unknown event, ignoring");
        }
    }
}

/// Handle a `join_user` event: record the display name, push the updated
/// presence snapshot to everyone, then relay the join announcement as a
/// `message` to everyone except the sender.
///
/// A repeated join from the same connection overwrites the stored name and
/// re-broadcasts presence, but the announcement is suppressed so reconnect
/// churn does not produce duplicate "joined the chat" lines.
fn handle_join(conn_id: ConnectionId, state: &AppState, data: &Value) {
    let name = data
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let first_join = state.roster.register(conn_id, name);

    // Registry updated first, then presence recomputed and broadcast.
    presence::broadcast_presence(&state.connections, &state.roster);

    if first_join {
        broadcast_to_others(&state.connections, conn_id, EVENT_MESSAGE, data);
        tracing::info!(conn_id = %conn_id, name = %name, "joined the chat");
    } else {
        tracing::debug!(conn_id = %conn_id, name = %name, "Repeated join, name overwritten");
    }
}
