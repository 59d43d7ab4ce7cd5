//! Autosave/load of the full snapshot.
//!
//! All failures are swallowed at this boundary: a save that cannot complete
//! is logged and ignored, a load that cannot parse yields `None` and the
//! caller starts from an empty snapshot.

use std::path::{Path, PathBuf};

use shared::Snapshot;

use super::BuilderStore;

impl BuilderStore {
    /// Get autosave file path
    fn autosave_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "woodshop", "woodshop")
            .map(|dirs| dirs.data_dir().join("builder_state.json"))
    }

    /// Save the current snapshot to the autosave file, best-effort
    pub fn autosave(&self) {
        if let Some(path) = Self::autosave_path() {
            self.save_to(&path);
        }
    }

    /// Load a snapshot from the autosave file
    pub fn load_autosave() -> Option<Snapshot> {
        Self::load_from(&Self::autosave_path()?)
    }

    /// Save the current snapshot to an explicit path, best-effort
    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self.snapshot()) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    tracing::warn!("Failed to persist builder state: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize builder state: {e}"),
        }
    }

    /// Load a snapshot from an explicit path
    pub fn load_from(path: &Path) -> Option<Snapshot> {
        let json = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("Failed to parse builder state: {e}");
                None
            }
        }
    }
}
