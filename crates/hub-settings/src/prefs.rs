//! Persisted hub preferences.
//!
//! A single TOML file holds the last chosen games folder:
//! - Linux: `~/.config/gamehub/GameHubPrefs.toml`
//! - Windows: `%APPDATA%/gamehub/GameHubPrefs.toml`

use std::path::{Path, PathBuf};

use gamehub_library::EntryRef;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Preference namespace; also the file stem.
pub const PREFS_NAMESPACE: &str = "GameHubPrefs";

/// Stored preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Identity of the last chosen games folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub games_folder_uri: Option<String>,
}

/// Reads and writes [`Preferences`] at a fixed path.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store at the platform default location.
    pub fn open_default() -> Result<Self, SettingsError> {
        let dir = gamehub_config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::in_dir(&dir))
    }

    /// Store inside an explicit directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{PREFS_NAMESPACE}.toml")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads preferences; a missing file yields the defaults.
    pub fn load(&self) -> Result<Preferences, SettingsError> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, prefs: &Preferences) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(prefs)?;
        std::fs::write(&self.path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }

    pub fn games_folder(&self) -> Result<Option<EntryRef>, SettingsError> {
        Ok(self
            .load()?
            .games_folder_uri
            .as_deref()
            .map(EntryRef::parse))
    }

    pub fn set_games_folder(&self, folder: &EntryRef) -> Result<(), SettingsError> {
        let mut prefs = self.load()?;
        prefs.games_folder_uri = Some(folder.key());
        self.save(&prefs)
    }

    pub fn clear_games_folder(&self) -> Result<(), SettingsError> {
        let mut prefs = self.load()?;
        prefs.games_folder_uri = None;
        self.save(&prefs)
    }
}

/// Returns the platform-specific GameHub config directory.
pub fn gamehub_config_dir() -> Option<PathBuf> {
    config_base().map(|base| base.join("gamehub"))
}

fn config_base() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join(".config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PreferenceStore::in_dir(tmp.path());
        assert_eq!(store.load().unwrap(), Preferences::default());
        assert!(store.games_folder().unwrap().is_none());
    }

    #[test]
    fn file_name_uses_namespace() {
        let store = PreferenceStore::in_dir(Path::new("/cfg"));
        assert_eq!(store.path(), Path::new("/cfg/GameHubPrefs.toml"));
    }

    #[test]
    fn games_folder_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PreferenceStore::in_dir(&tmp.path().join("nested"));
        let folder = EntryRef::new("/home/player/Games");

        store.set_games_folder(&folder).unwrap();
        assert_eq!(store.games_folder().unwrap(), Some(folder));

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("games_folder_uri = \"file:///home/player/Games\""));

        store.clear_games_folder().unwrap();
        assert!(store.games_folder().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PreferenceStore::in_dir(tmp.path());
        std::fs::write(store.path(), "games_folder_uri = [").unwrap();
        assert!(matches!(store.load(), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn config_dir_mentions_gamehub() {
        if let Some(dir) = gamehub_config_dir() {
            assert!(dir.ends_with("gamehub"));
        }
    }
}
