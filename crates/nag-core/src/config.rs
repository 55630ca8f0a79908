//! Configuration management for nag.
//!
//! User-level settings live in `config.toml` inside the nag home directory
//! (`~/.nag` by default). Every field has a default, so a partial or
//! missing file is always usable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

/// Name of the config file inside the nag home directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Default name of the task snapshot file inside the nag home directory.
pub const DATA_FILE: &str = "tasks.json";

/// User-level nag configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NagConfig {
    /// Where the task snapshot lives. Relative paths are resolved against
    /// the nag home directory.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Reminder loop settings.
    #[serde(default)]
    pub reminder: ReminderSettings,
}

/// Settings for the background reminder loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderSettings {
    /// Spawn the loop alongside interactive sessions.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between reminder sweeps.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Timeout hint handed to the notification backend, in seconds.
    #[serde(default = "default_notify_timeout_secs")]
    pub notify_timeout_secs: u32,
}

// Default value providers
fn default_enabled() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    60
}

fn default_notify_timeout_secs() -> u32 {
    10
}

impl NagConfig {
    /// Load configuration from `<home>/config.toml` or use defaults.
    pub fn load_or_default(home: &Path) -> Result<Self> {
        let config_path = home.join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config = toml::from_str(&content).map_err(|e| {
                Error::Config(format!("failed to parse {}: {}", config_path.display(), e))
            })?;
            debug!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default configuration to `<home>/config.toml`, creating
    /// the directory if needed.
    pub fn write_default(home: &Path) -> Result<()> {
        std::fs::create_dir_all(home)?;

        let config_path = home.join(CONFIG_FILE);
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        debug!("Wrote default config to {}", config_path.display());
        Ok(())
    }

    /// The resolved task snapshot path.
    pub fn data_file(&self, home: &Path) -> PathBuf {
        match &self.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => home.join(path),
            None => home.join(DATA_FILE),
        }
    }
}

impl Default for NagConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            reminder: ReminderSettings::default(),
        }
    }
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_secs: default_interval_secs(),
            notify_timeout_secs: default_notify_timeout_secs(),
        }
    }
}

/// The per-user nag directory: `~/.nag`, or `%LOCALAPPDATA%\nag` on
/// Windows. `None` when the environment defines no home.
pub fn nag_home() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("LOCALAPPDATA").map(|dir| PathBuf::from(dir).join("nag"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".nag"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_values() {
        let config = NagConfig::default();
        assert_eq!(config.data_file, None);
        assert!(config.reminder.enabled);
        assert_eq!(config.reminder.interval_secs, 60);
        assert_eq!(config.reminder.notify_timeout_secs, 10);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let home = TempDir::new().unwrap();
        let config = NagConfig::load_or_default(home.path()).unwrap();
        assert!(config.reminder.enabled);
        assert_eq!(config.reminder.interval_secs, 60);
    }

    #[test]
    fn test_partial_file_keeps_field_defaults() {
        let home = TempDir::new().unwrap();
        std::fs::write(
            home.path().join(CONFIG_FILE),
            "[reminder]\ninterval_secs = 5\n",
        )
        .unwrap();

        let config = NagConfig::load_or_default(home.path()).unwrap();

        assert_eq!(config.reminder.interval_secs, 5);
        assert!(config.reminder.enabled);
        assert_eq!(config.reminder.notify_timeout_secs, 10);
    }

    #[test]
    fn test_write_default_then_load_round_trips() {
        let home = TempDir::new().unwrap();
        NagConfig::write_default(home.path()).unwrap();

        let config = NagConfig::load_or_default(home.path()).unwrap();

        assert_eq!(config.reminder.interval_secs, 60);
        assert!(home.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_invalid_toml_reports_config_error() {
        let home = TempDir::new().unwrap();
        std::fs::write(home.path().join(CONFIG_FILE), "not toml = = =").unwrap();

        let err = NagConfig::load_or_default(home.path()).unwrap_err();

        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_data_file_resolution() {
        let home = Path::new("/home/someone/.nag");

        let default = NagConfig::default();
        assert_eq!(default.data_file(home), home.join("tasks.json"));

        let relative = NagConfig {
            data_file: Some(PathBuf::from("lists/work.json")),
            ..NagConfig::default()
        };
        assert_eq!(relative.data_file(home), home.join("lists/work.json"));

        let absolute = NagConfig {
            data_file: Some(PathBuf::from("/srv/shared/tasks.json")),
            ..NagConfig::default()
        };
        assert_eq!(
            absolute.data_file(home),
            PathBuf::from("/srv/shared/tasks.json")
        );
    }
}
