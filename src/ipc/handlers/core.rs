use std::path::PathBuf;

use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::persist;
use crate::ui::Sections;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

/// Points the store at a workspace directory and rehydrates the persisted
/// whitelist before any further request is answered. Rehydration is
/// best-effort: a missing or unreadable slot means empty defaults, never a
/// failed select. UI state always starts fresh.
fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = path else {
        return err(&req.id, "bad_params", "missing params.path");
    };

    if let Err(e) = std::fs::create_dir_all(&path) {
        return err(&req.id, "workspace_create_failed", e.to_string());
    }

    state.store = persist::load(&path);
    state.token = persist::read_token(&path);
    state.ui = Sections::default();
    state.workspace = Some(path.clone());

    ok(
        &req.id,
        json!({
            "workspacePath": path.to_string_lossy(),
            "restored": {
                "students": state.store.students.len(),
                "teachers": state.store.teachers.len(),
                "classes": state.store.classes.len(),
                "fees": state.store.fees.len(),
                "events": state.store.events.len(),
                "admissions": state.store.admissions.len(),
                "notifications": state.store.notifications.len(),
            },
            "isAuthenticated": state.store.is_authenticated,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        _ => None,
    }
}
