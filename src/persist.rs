use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::{
    Admission, Class, DashboardMetrics, Event, Fee, Notification, Student, Teacher, User,
};
use crate::store::{Collection, Store};

/// Single durable slot for the whitelisted store fields.
pub const STORE_FILE: &str = "school-admin-store.json";
/// The auth token lives in its own slot, outside the store namespace.
pub const TOKEN_FILE: &str = "token";
/// Bumped on any change to the snapshot shape. A mismatch on load discards
/// the old blob; there is no migration machinery at this scale.
pub const SCHEMA_VERSION: u32 = 1;

/// The persisted whitelist. UI state and the `logs`/`salaries` collections
/// are deliberately absent; they reset to defaults on every start.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub schema_version: u32,
    pub current_user: Option<User>,
    pub is_authenticated: bool,
    pub notifications: Collection<Notification>,
    pub students: Collection<Student>,
    pub teachers: Collection<Teacher>,
    pub classes: Collection<Class>,
    pub fees: Collection<Fee>,
    pub events: Collection<Event>,
    pub admissions: Collection<Admission>,
    pub dashboard_metrics: DashboardMetrics,
}

impl Snapshot {
    pub fn of(store: &Store) -> Snapshot {
        Snapshot {
            schema_version: SCHEMA_VERSION,
            current_user: store.current_user.clone(),
            is_authenticated: store.is_authenticated,
            notifications: store.notifications.clone(),
            students: store.students.clone(),
            teachers: store.teachers.clone(),
            classes: store.classes.clone(),
            fees: store.fees.clone(),
            events: store.events.clone(),
            admissions: store.admissions.clone(),
            dashboard_metrics: store.dashboard_metrics.clone(),
        }
    }

    /// Restores the whitelisted fields onto a fresh store. Everything outside
    /// the whitelist keeps its default.
    pub fn restore(self) -> Store {
        Store {
            current_user: self.current_user,
            is_authenticated: self.is_authenticated,
            notifications: self.notifications,
            students: self.students,
            teachers: self.teachers,
            classes: self.classes,
            fees: self.fees,
            events: self.events,
            admissions: self.admissions,
            dashboard_metrics: self.dashboard_metrics,
            ..Store::default()
        }
    }
}

/// Writes the snapshot via a temp file and rename so a crash mid-write never
/// leaves a truncated slot behind.
pub fn save(workspace: &Path, store: &Store) -> anyhow::Result<()> {
    std::fs::create_dir_all(workspace)
        .with_context(|| format!("failed to create workspace {}", workspace.to_string_lossy()))?;
    let path = workspace.join(STORE_FILE);
    let tmp = workspace.join(format!("{}.writing", STORE_FILE));
    let blob = serde_json::to_string_pretty(&Snapshot::of(store))
        .context("failed to serialize store snapshot")?;
    std::fs::write(&tmp, blob)
        .with_context(|| format!("failed to write {}", tmp.to_string_lossy()))?;
    std::fs::rename(&tmp, &path)
        .with_context(|| format!("failed to move snapshot to {}", path.to_string_lossy()))?;
    Ok(())
}

/// Rehydrates the store from the slot. Persistence is best-effort and never
/// load-blocking: a missing file, unreadable JSON, or a schema-version
/// mismatch all fall back to an empty store.
pub fn load(workspace: &Path) -> Store {
    let path = workspace.join(STORE_FILE);
    let text = match std::fs::read_to_string(&path) {
        Ok(t) => t,
        Err(_) => return Store::default(),
    };
    match serde_json::from_str::<Snapshot>(&text) {
        Ok(snapshot) if snapshot.schema_version == SCHEMA_VERSION => snapshot.restore(),
        Ok(snapshot) => {
            tracing::warn!(
                found = snapshot.schema_version,
                expected = SCHEMA_VERSION,
                "discarding persisted store with mismatched schema version"
            );
            Store::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, "persisted store is not valid JSON, starting empty");
            Store::default()
        }
    }
}

pub fn read_token(workspace: &Path) -> Option<String> {
    std::fs::read_to_string(workspace.join(TOKEN_FILE))
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

pub fn write_token(workspace: &Path, token: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(workspace)
        .with_context(|| format!("failed to create workspace {}", workspace.to_string_lossy()))?;
    std::fs::write(workspace.join(TOKEN_FILE), token).context("failed to write token slot")
}

pub fn clear_token(workspace: &Path) {
    let _ = std::fs::remove_file(workspace.join(TOKEN_FILE));
}
