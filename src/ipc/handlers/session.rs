use serde::Deserialize;
use serde_json::json;

use crate::ipc::error::ok;
use crate::ipc::handlers::common::parse;
use crate::ipc::types::{AppState, Request};
use crate::model::User;
use crate::persist;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginParams {
    user: User,
    token: String,
}

/// The UI owns the REST round-trip; this call just records its outcome. The
/// contract is a boolean, never an error: anything wrong with the payload
/// means `loggedIn: false` and the session stays as it was.
fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p: LoginParams = match parse(&req.params) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, "login payload rejected");
            return ok(&req.id, json!({ "loggedIn": false }));
        }
    };

    state.store.current_user = Some(p.user);
    state.store.is_authenticated = true;
    state.token = Some(p.token.clone());
    if let Some(workspace) = state.workspace.as_ref() {
        // Token lives in its own slot, outside the store blob.
        if let Err(e) = persist::write_token(workspace, &p.token) {
            tracing::warn!(error = %e, "failed to write token slot");
        }
    }
    state.persist();
    ok(&req.id, json!({ "loggedIn": true }))
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.store.current_user = None;
    state.store.is_authenticated = false;
    state.token = None;
    if let Some(workspace) = state.workspace.as_ref() {
        persist::clear_token(workspace);
    }
    state.persist();
    ok(&req.id, json!({ "loggedOut": true }))
}

fn handle_current(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "user": state.store.current_user,
            "isAuthenticated": state.store.is_authenticated,
            "hasToken": state.token.is_some(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.login" => Some(handle_login(state, req)),
        "session.logout" => Some(handle_logout(state, req)),
        "session.current" => Some(handle_current(state, req)),
        _ => None,
    }
}
