//! Games folder selection.

use std::path::Path;

use gamehub_library::EntryRef;
use tracing::info;

use crate::error::SettingsError;
use crate::prefs::PreferenceStore;

/// Label shown when a folder has no name of its own (e.g. `/`).
const UNNAMED_FOLDER: &str = "Selected folder";

/// Validates a user-chosen folder and remembers it.
#[derive(Debug, Clone)]
pub struct FolderSelector {
    store: PreferenceStore,
}

impl FolderSelector {
    pub fn new(store: PreferenceStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    /// Accepts `path` as the games folder if it is a readable directory.
    ///
    /// The canonical path is persisted and returned.
    pub fn select(&self, path: &Path) -> Result<EntryRef, SettingsError> {
        let invalid = |reason: String| SettingsError::InvalidFolder {
            path: path.to_path_buf(),
            reason,
        };

        let canonical = std::fs::canonicalize(path).map_err(|e| invalid(e.to_string()))?;
        if !canonical.is_dir() {
            return Err(invalid("not a directory".into()));
        }
        std::fs::read_dir(&canonical).map_err(|e| invalid(format!("not readable: {e}")))?;

        let folder = EntryRef::new(canonical);
        self.store.set_games_folder(&folder)?;
        info!(folder = %folder, "games folder selected");
        Ok(folder)
    }

    /// The remembered folder, if any.
    pub fn current(&self) -> Result<Option<EntryRef>, SettingsError> {
        self.store.games_folder()
    }
}

/// Human-readable name for a folder.
pub fn folder_label(folder: &EntryRef) -> String {
    folder
        .file_name()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNNAMED_FOLDER.to_string())
}
