use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::handlers::common::{collection_ops, parse, stats_response};
use crate::ipc::types::{AppState, Request};
use crate::stats;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordPaymentParams {
    id: String,
    amount: f64,
    method: String,
    /// Payment date; defaults to today when the UI omits it.
    on: Option<NaiveDate>,
}

fn handle_record_payment(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p: RecordPaymentParams = match parse(&req.params) {
        Ok(p) => p,
        Err(e) => return err(&req.id, "bad_params", e),
    };
    let on = p.on.unwrap_or_else(|| chrono::Local::now().date_naive());
    let outcome = state
        .store
        .fees
        .update(&p.id, |fee| fee.record_payment(p.amount, &p.method, on));
    state.persist();

    let fee = state.store.fees.get(&p.id);
    ok(
        &req.id,
        json!({
            "id": p.id,
            "outcome": outcome,
            "fee": fee,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "fees.recordPayment" => Some(handle_record_payment(state, req)),
        "fees.stats" => Some(stats_response(
            &req.id,
            &stats::fee_stats(state.store.fees.items()),
        )),
        _ => collection_ops("fees", state, req, |s| (&mut s.store.fees, &mut s.ui.fees)),
    }
}
