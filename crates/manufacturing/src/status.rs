use serde::{Deserialize, Serialize};

/// Lifecycle state of a record held by a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    /// Freshly constructed, never persisted.
    ReadyNew,
    /// Loaded and unchanged (or committed).
    ReadyClean,
    /// Loaded with pending changes, including defaults filled in on load.
    ReadyDirty,
}

impl ModelStatus {
    pub fn is_dirty(self) -> bool {
        matches!(self, ModelStatus::ReadyNew | ModelStatus::ReadyDirty)
    }
}
