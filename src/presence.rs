//! Server-side presence tracking and broadcast.
//!
//! In-memory roster (DashMap) keyed by connection id, holding each session's
//! chosen display name. Broadcasts the full `online_users_list` snapshot over
//! WebSocket after every roster mutation.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::ws::broadcast::broadcast_to_all;
use crate::ws::protocol::EVENT_ONLINE_USERS_LIST;
use crate::ws::{ConnectionId, ConnectionRegistry};

/// Roster entry: join sequence number plus the chosen display name.
/// The sequence number fixes the position of the name in presence snapshots
/// and survives a re-join (name overwrite keeps the original slot).
#[derive(Debug, Clone)]
struct RosterEntry {
    seq: u64,
    name: String,
}

/// The presence registry: connection id -> display name.
///
/// Names are client-supplied and trusted as-is: empty strings and duplicates
/// are accepted, nothing is deduplicated or rejected. Entries are removed
/// synchronously on disconnect; there is no lazy expiry. State is lost on
/// process restart.
#[derive(Debug, Default)]
pub struct Roster {
    entries: DashMap<ConnectionId, RosterEntry>,
    join_seq: AtomicU64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` for `conn_id`. Returns `true` if this is the first join
    /// for the connection, `false` when an existing entry was overwritten.
    /// Overwriting keeps the original join sequence, so the connection does
    /// not move within the snapshot order.
    pub fn register(&self, conn_id: ConnectionId, name: &str) -> bool {
        match self.entries.get_mut(&conn_id) {
            Some(mut entry) => {
                entry.name = name.to_string();
                false
            }
            None => {
                let seq = self.join_seq.fetch_add(1, Ordering::Relaxed);
                self.entries.insert(
                    conn_id,
                    RosterEntry {
                        seq,
                        name: name.to_string(),
                    },
                );
                true
            }
        }
    }

    /// Remove the entry for `conn_id`, returning its display name.
    /// No-op (returns `None`) for connections that never joined.
    pub fn unregister(&self, conn_id: ConnectionId) -> Option<String> {
        self.entries.remove(&conn_id).map(|(_, entry)| entry.name)
    }

    /// Snapshot of all registered display names in join order, duplicates
    /// preserved. Callers must not assume stability across calls.
    pub fn list_names(&self) -> Vec<String> {
        let mut entries: Vec<(u64, String)> = self
            .entries
            .iter()
            .map(|entry| (entry.value().seq, entry.value().name.clone()))
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, name)| name).collect()
    }
}

/// Push the current presence snapshot to every connected client.
/// Called after every roster mutation (join or disconnect). Full replacement
/// list, not a delta.
pub fn broadcast_presence(registry: &ConnectionRegistry, roster: &Roster) {
    let names = roster.list_names();
    broadcast_to_all(registry, EVENT_ONLINE_USERS_LIST, &serde_json::json!(names));
}
