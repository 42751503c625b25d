use crate::ipc::handlers::common::collection_ops;
use crate::ipc::types::{AppState, Request};

// The audit trail is just another collection; it is ephemeral (outside the
// persistence whitelist) and carries no stats.
pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    collection_ops("logs", state, req, |s| (&mut s.store.logs, &mut s.ui.logs))
}
