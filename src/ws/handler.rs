use axum::{
    extract::{ws::WebSocket, State, WebSocketUpgrade},
    response::Response,
};

use crate::state::AppState;
use crate::ws::{actor, ConnectionId};

/// GET /ws
/// WebSocket upgrade endpoint. No authentication: identities are
/// client-supplied display names announced via `join_user` after connect.
/// Assigns a fresh connection id and spawns the actor for the session.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let conn_id = ConnectionId::next();
    ws.on_upgrade(move |socket| handle_connected(socket, state, conn_id))
}

async fn handle_connected(socket: WebSocket, state: AppState, conn_id: ConnectionId) {
    actor::run_connection(socket, state, conn_id).await;
}
