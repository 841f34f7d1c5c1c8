//! Hub configuration management.
//!
//! Configuration is stored as TOML next to the preferences file:
//! - Linux: `~/.config/gamehub/hub.toml`
//! - Windows: `%APPDATA%/gamehub/hub.toml`

use std::path::{Path, PathBuf};

use gamehub_hub_games::SessionOptions;
use serde::{Deserialize, Serialize};

/// Hub configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubConfig {
    /// Executable that runs LOVE games.
    #[serde(default = "default_runtime_command")]
    pub runtime_command: String,

    /// Extra arguments placed before the game path.
    #[serde(default)]
    pub runtime_args: Vec<String>,

    /// Concurrent icon workers.
    #[serde(default = "default_icon_workers")]
    pub icon_workers: usize,

    /// Largest icon side in pixels.
    #[serde(default = "default_max_icon_size")]
    pub max_icon_size: u32,
}

fn default_runtime_command() -> String {
    "love".into()
}

fn default_icon_workers() -> usize {
    2
}

fn default_max_icon_size() -> u32 {
    256
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            runtime_command: default_runtime_command(),
            runtime_args: Vec::new(),
            icon_workers: default_icon_workers(),
            max_icon_size: default_max_icon_size(),
        }
    }
}

impl HubConfig {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: HubConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = HubConfig::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            icon_workers: self.icon_workers.max(1),
            max_icon_size: self.max_icon_size.max(1),
        }
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    let dir = gamehub_hub_settings::gamehub_config_dir()
        .ok_or_else(|| anyhow::anyhow!("config directory not available"))?;
    Ok(dir.join("hub.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = HubConfig::default();
        assert_eq!(config.runtime_command, "love");
        assert!(config.runtime_args.is_empty());
        assert_eq!(config.session_options(), SessionOptions::default());
    }

    #[test]
    fn config_partial_toml() {
        let config: HubConfig = toml::from_str(r#"runtime_command = "/opt/love/love""#).unwrap();
        assert_eq!(config.runtime_command, "/opt/love/love");
        assert_eq!(config.icon_workers, 2);
        assert_eq!(config.max_icon_size, 256);
    }

    #[test]
    fn zero_values_are_clamped() {
        let config = HubConfig {
            icon_workers: 0,
            max_icon_size: 0,
            ..HubConfig::default()
        };
        let options = config.session_options();
        assert_eq!(options.icon_workers, 1);
        assert_eq!(options.max_icon_size, 1);
    }

    #[test]
    fn load_creates_default_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("gamehub").join("hub.toml");

        let config = HubConfig::load_from(&path).unwrap();
        assert_eq!(config, HubConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("hub.toml");
        let config = HubConfig {
            runtime_args: vec!["--fused".into()],
            icon_workers: 4,
            ..HubConfig::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(HubConfig::load_from(&path).unwrap(), config);
    }
}
