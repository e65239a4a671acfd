use std::sync::Arc;

use crate::presence::Roster;
use crate::ws::ConnectionRegistry;

/// Shared application state passed to all handlers via axum State extractor.
///
/// The roster is the only mutable resource with domain meaning; the
/// connection registry holds the fan-out channels. Both are owned here and
/// injected into the relay and presence code rather than living as globals,
/// so their lifecycle is tied to server start/stop.
#[derive(Clone)]
pub struct AppState {
    /// Active WebSocket connections, keyed by connection id
    pub connections: ConnectionRegistry,
    /// In-memory presence registry: connection id -> display name
    pub roster: Arc<Roster>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            connections: crate::ws::new_connection_registry(),
            roster: Arc::new(Roster::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
