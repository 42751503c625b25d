use chrono::Utc;
use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::handlers::common::{apply_json_patch, collection_ops, parse, stats_response};
use crate::ipc::types::{AppState, Request};
use crate::stats;
use crate::store::WriteOutcome;

#[derive(serde::Deserialize)]
struct UpdateParams {
    id: String,
    patch: serde_json::Value,
}

/// Notifications are the one entity with automatic timestamping: every
/// successful update stamps `updatedAt`, whatever the patch contained.
fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p: UpdateParams = match parse(&req.params) {
        Ok(p) => p,
        Err(e) => return err(&req.id, "bad_params", e),
    };
    let outcome = match apply_json_patch(&mut state.store.notifications, &p.id, &p.patch) {
        Ok(outcome) => outcome,
        Err(e) => return err(&req.id, "bad_params", e),
    };
    if outcome == WriteOutcome::Applied {
        state
            .store
            .notifications
            .update(&p.id, |n| n.updated_at = Utc::now());
    }
    state.persist();
    ok(&req.id, json!({ "id": p.id, "outcome": outcome }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "notifications.update" => Some(handle_update(state, req)),
        "notifications.stats" => Some(stats_response(
            &req.id,
            &stats::notification_stats(state.store.notifications.items()),
        )),
        _ => collection_ops("notifications", state, req, |s| {
            (&mut s.store.notifications, &mut s.ui.notifications)
        }),
    }
}
