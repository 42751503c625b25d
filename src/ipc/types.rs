use std::path::PathBuf;

use serde::Deserialize;

use crate::persist;
use crate::store::Store;
use crate::ui::Sections;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// The whole application context: constructed once in `main` and threaded
/// through the router by reference. No module-level state anywhere.
pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub store: Store,
    pub ui: Sections,
    pub token: Option<String>,
}

impl AppState {
    pub fn new() -> AppState {
        AppState {
            workspace: None,
            store: Store::default(),
            ui: Sections::default(),
            token: None,
        }
    }

    /// Fire-and-forget snapshot write; mutations never wait on or fail from
    /// persistence. Without a workspace the store is memory-only.
    pub fn persist(&self) {
        let Some(workspace) = self.workspace.as_ref() else {
            return;
        };
        if let Err(e) = persist::save(workspace, &self.store) {
            tracing::warn!(error = %e, "failed to persist store snapshot");
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new()
    }
}
