use crate::ipc::handlers::common::collection_ops;
use crate::ipc::types::{AppState, Request};

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    collection_ops("classes", state, req, |s| {
        (&mut s.store.classes, &mut s.ui.classes)
    })
}
