//! Hub-local settings and UI state.
//!
//! - [`notice`]: transient, non-blocking user notices
//! - [`prefs`]: the persisted games folder (`GameHubPrefs.toml`)
//! - [`folder`]: validating and remembering the chosen folder

pub mod error;
pub mod folder;
pub mod notice;
pub mod prefs;

pub use error::SettingsError;
pub use folder::{FolderSelector, folder_label};
pub use notice::{Notice, NoticeKind, NoticeQueue};
pub use prefs::{PreferenceStore, Preferences, gamehub_config_dir};
