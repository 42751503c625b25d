use crate::ipc::handlers::common::{collection_ops, stats_as_of, stats_response};
use crate::ipc::types::{AppState, Request};
use crate::stats;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    if req.method == "students.stats" {
        let as_of = stats_as_of(&req.params);
        let s = stats::student_stats(state.store.students.items(), as_of);
        return Some(stats_response(&req.id, &s));
    }
    collection_ops("students", state, req, |s| {
        (&mut s.store.students, &mut s.ui.students)
    })
}
