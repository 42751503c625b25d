use crate::ipc::handlers::common::{collection_ops, stats_response};
use crate::ipc::types::{AppState, Request};
use crate::stats;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    if req.method == "teachers.stats" {
        let s = stats::teacher_stats(state.store.teachers.items());
        return Some(stats_response(&req.id, &s));
    }
    collection_ops("teachers", state, req, |s| {
        (&mut s.store.teachers, &mut s.ui.teachers)
    })
}
