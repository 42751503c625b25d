use crate::ipc::error::{err, ok};
use crate::ipc::handlers::common::stats_as_of;
use crate::ipc::types::{AppState, Request};
use crate::model::DashboardMetrics;
use crate::stats;

fn compute(state: &AppState, params: &serde_json::Value) -> DashboardMetrics {
    let store = &state.store;
    stats::dashboard_metrics(
        store.students.items(),
        store.teachers.items(),
        store.classes.len(),
        store.fees.items(),
        store.events.items(),
        store.admissions.items(),
        store.notifications.items(),
        stats_as_of(params),
    )
}

fn handle_metrics(state: &mut AppState, req: &Request) -> serde_json::Value {
    match serde_json::to_value(compute(state, &req.params)) {
        Ok(v) => ok(&req.id, v),
        Err(e) => err(&req.id, "encode_failed", e.to_string()),
    }
}

/// Recomputes the card numbers and stores them, so the last-known metrics
/// survive a restart through the persisted snapshot.
fn handle_refresh(state: &mut AppState, req: &Request) -> serde_json::Value {
    let metrics = compute(state, &req.params);
    state.store.dashboard_metrics = metrics;
    state.persist();
    match serde_json::to_value(&state.store.dashboard_metrics) {
        Ok(v) => ok(&req.id, v),
        Err(e) => err(&req.id, "encode_failed", e.to_string()),
    }
}

fn handle_cached(state: &mut AppState, req: &Request) -> serde_json::Value {
    match serde_json::to_value(&state.store.dashboard_metrics) {
        Ok(v) => ok(&req.id, v),
        Err(e) => err(&req.id, "encode_failed", e.to_string()),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.metrics" => Some(handle_metrics(state, req)),
        "dashboard.refresh" => Some(handle_refresh(state, req)),
        "dashboard.cached" => Some(handle_cached(state, req)),
        _ => None,
    }
}
