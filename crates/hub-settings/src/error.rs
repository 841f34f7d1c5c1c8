//! Error types for settings and folder selection.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid preferences file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("invalid folder {}: {reason}", path.display())]
    InvalidFolder { path: PathBuf, reason: String },

    #[error("config directory not available")]
    NoConfigDir,
}
