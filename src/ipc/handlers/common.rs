use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::query::{visible_page, Queryable};
use crate::store::{Collection, Entity, WriteOutcome};
use crate::ui::{SectionUi, SectionUiPatch};

/// Deserializes request params, treating absent params as the default shape.
pub fn parse_or_default<T: DeserializeOwned + Default>(
    params: &serde_json::Value,
) -> Result<T, String> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params.clone()).map_err(|e| e.to_string())
}

pub fn parse<T: DeserializeOwned>(params: &serde_json::Value) -> Result<T, String> {
    serde_json::from_value(params.clone()).map_err(|e| e.to_string())
}

/// Builds a record from create params. The caller may supply `id`; when it is
/// absent or empty the handler owns generation and assigns a fresh UUID.
fn record_from_params<T: DeserializeOwned>(params: &serde_json::Value) -> Result<(T, String), String> {
    let mut doc = params.clone();
    let id = match doc.get("id").and_then(|v| v.as_str()) {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => {
            let generated = Uuid::new_v4().to_string();
            if let Some(map) = doc.as_object_mut() {
                map.insert("id".to_string(), json!(generated));
            }
            generated
        }
    };
    let record: T = serde_json::from_value(doc).map_err(|e| e.to_string())?;
    Ok((record, id))
}

/// Shallow-merges a JSON patch into the record with the given id: top-level
/// patch keys overwrite record fields, everything else is untouched. `id` in
/// the patch is ignored so an update can never break uniqueness. Missing id
/// is a no-op reported through the outcome, not an error.
pub fn apply_json_patch<T>(
    collection: &mut Collection<T>,
    id: &str,
    patch: &serde_json::Value,
) -> Result<WriteOutcome, String>
where
    T: Entity + Serialize + DeserializeOwned,
{
    let Some(current) = collection.get(id) else {
        return Ok(WriteOutcome::NotFound);
    };
    let mut doc = serde_json::to_value(current).map_err(|e| e.to_string())?;
    let Some(patch_map) = patch.as_object() else {
        return Err("patch must be an object".to_string());
    };
    let Some(doc_map) = doc.as_object_mut() else {
        return Err("record did not serialize to an object".to_string());
    };
    for (key, value) in patch_map {
        if key == "id" {
            continue;
        }
        doc_map.insert(key.clone(), value.clone());
    }
    let updated: T = serde_json::from_value(doc).map_err(|e| e.to_string())?;
    Ok(collection.update(id, |slot| *slot = updated))
}

pub fn page_response<T>(
    req_id: &str,
    collection: &Collection<T>,
    ui: &SectionUi<T::Filters>,
) -> serde_json::Value
where
    T: Entity + Queryable + Serialize,
{
    match serde_json::to_value(visible_page(collection.items(), ui)) {
        Ok(page) => ok(req_id, page),
        Err(e) => err(req_id, "encode_failed", e.to_string()),
    }
}

fn ui_response<F: Serialize>(req_id: &str, ui: &SectionUi<F>) -> serde_json::Value {
    match serde_json::to_value(ui) {
        Ok(v) => ok(req_id, v),
        Err(e) => err(req_id, "encode_failed", e.to_string()),
    }
}

#[derive(serde::Deserialize)]
struct IdParams {
    id: String,
}

#[derive(serde::Deserialize)]
struct IdPatchParams {
    id: String,
    patch: serde_json::Value,
}

#[derive(serde::Deserialize)]
struct IdsParams {
    ids: Vec<String>,
}

#[derive(serde::Deserialize)]
struct SetParams<T> {
    items: Vec<T>,
}

/// The CRUD + query surface every entity family shares. `select` projects the
/// family's collection and section UI state out of the app context; family
/// modules layer their composite ops (recordPayment, markPaid, stats) on top.
pub fn collection_ops<T>(
    family: &str,
    state: &mut AppState,
    req: &Request,
    select: fn(&mut AppState) -> (&mut Collection<T>, &mut SectionUi<T::Filters>),
) -> Option<serde_json::Value>
where
    T: Entity + Queryable + Serialize + DeserializeOwned,
    T::Filters: Serialize + DeserializeOwned + Default + PartialEq,
{
    let op = req.method.strip_prefix(family)?.strip_prefix('.')?;
    let mutated = matches!(op, "set" | "create" | "update" | "delete" | "bulkDelete");

    let resp = {
        let (collection, ui) = select(state);
        match op {
            "set" => match parse::<SetParams<T>>(&req.params) {
                Ok(p) => {
                    let count = p.items.len();
                    collection.set(p.items);
                    ok(&req.id, json!({ "count": count }))
                }
                Err(e) => err(&req.id, "bad_params", e),
            },
            "list" => page_response(&req.id, collection, ui),
            "query" => match parse_or_default::<SectionUiPatch<T::Filters>>(&req.params) {
                Ok(patch) => {
                    ui.apply(patch);
                    page_response(&req.id, collection, ui)
                }
                Err(e) => err(&req.id, "bad_params", e),
            },
            "ui" => ui_response(&req.id, ui),
            "uiPatch" => match parse_or_default::<SectionUiPatch<T::Filters>>(&req.params) {
                Ok(patch) => {
                    ui.apply(patch);
                    ui_response(&req.id, ui)
                }
                Err(e) => err(&req.id, "bad_params", e),
            },
            "create" => match record_from_params::<T>(&req.params) {
                Ok((record, id)) => {
                    let outcome = collection.add(record);
                    ok(&req.id, json!({ "id": id, "outcome": outcome }))
                }
                Err(e) => err(&req.id, "bad_params", e),
            },
            "update" => match parse::<IdPatchParams>(&req.params) {
                Ok(p) => match apply_json_patch(collection, &p.id, &p.patch) {
                    Ok(outcome) => ok(&req.id, json!({ "id": p.id, "outcome": outcome })),
                    Err(e) => err(&req.id, "bad_params", e),
                },
                Err(e) => err(&req.id, "bad_params", e),
            },
            "delete" => match parse::<IdParams>(&req.params) {
                Ok(p) => {
                    let outcome = collection.delete(&p.id);
                    ok(&req.id, json!({ "id": p.id, "outcome": outcome }))
                }
                Err(e) => err(&req.id, "bad_params", e),
            },
            "bulkDelete" => match parse::<IdsParams>(&req.params) {
                Ok(p) => {
                    let removed = collection.bulk_delete(&p.ids);
                    ok(
                        &req.id,
                        json!({ "requested": p.ids.len(), "removed": removed }),
                    )
                }
                Err(e) => err(&req.id, "bad_params", e),
            },
            _ => return None,
        }
    };

    if mutated {
        state.persist();
    }
    Some(resp)
}

/// `asOf` lets callers (and tests) pin the date used by time-windowed stats;
/// it defaults to today's wall clock.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsParams {
    pub as_of: Option<chrono::NaiveDate>,
}

pub fn stats_as_of(params: &serde_json::Value) -> chrono::NaiveDate {
    parse_or_default::<StatsParams>(params)
        .ok()
        .and_then(|p| p.as_of)
        .unwrap_or_else(|| chrono::Local::now().date_naive())
}

pub fn stats_response<S: Serialize>(req_id: &str, stats: &S) -> serde_json::Value {
    match serde_json::to_value(stats) {
        Ok(v) => ok(req_id, v),
        Err(e) => err(req_id, "encode_failed", e.to_string()),
    }
}
