use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::handlers::common::{collection_ops, parse, stats_response};
use crate::ipc::types::{AppState, Request};
use crate::stats;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkPaidParams {
    id: String,
    on: Option<NaiveDate>,
    remarks: Option<String>,
}

fn handle_mark_paid(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p: MarkPaidParams = match parse(&req.params) {
        Ok(p) => p,
        Err(e) => return err(&req.id, "bad_params", e),
    };
    let on = p.on.unwrap_or_else(|| chrono::Local::now().date_naive());
    let outcome = state
        .store
        .salaries
        .update(&p.id, |salary| salary.mark_paid(on, p.remarks.clone()));
    state.persist();

    let salary = state.store.salaries.get(&p.id);
    ok(
        &req.id,
        json!({
            "id": p.id,
            "outcome": outcome,
            "salary": salary,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "salaries.markPaid" => Some(handle_mark_paid(state, req)),
        "salaries.stats" => Some(stats_response(
            &req.id,
            &stats::salary_stats(state.store.salaries.items()),
        )),
        _ => collection_ops("salaries", state, req, |s| {
            (&mut s.store.salaries, &mut s.ui.salaries)
        }),
    }
}
