//! User settings for chklst
//!
//! Manages where the deployment database and its backups live, the
//! auto-backup schedule, retention, and the log level.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ChklstPaths;
use crate::error::ChklstError;

/// Environment variable that overrides the database location
pub const DB_PATH_ENV: &str = "DB_PATH";

/// Auto-backup schedule settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoBackupSettings {
    /// Hours between two scheduled backups
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,
}

impl Default for AutoBackupSettings {
    fn default() -> Self {
        Self {
            interval_hours: default_interval_hours(),
        }
    }
}

/// User settings for chklst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Location of the deployment database (defaults to `<base>/chklst.db`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Location of the backup directory (defaults to `<base>/backups`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,

    /// Auto-backup schedule
    #[serde(default)]
    pub auto_backup: AutoBackupSettings,

    /// Age in days after which `backup clean` removes artifacts
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_interval_hours() -> u64 {
    24
}

fn default_retention_days() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            database_path: None,
            backup_dir: None,
            auto_backup: AutoBackupSettings::default(),
            retention_days: default_retention_days(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ChklstPaths) -> Result<Self, ChklstError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ChklstError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ChklstError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ChklstPaths) -> Result<(), ChklstError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ChklstError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            ChklstError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Resolve the database path: `DB_PATH`, then settings, then the default
    pub fn database_path(&self, paths: &ChklstPaths) -> PathBuf {
        let env_override = std::env::var_os(DB_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        self.database_path_with(env_override, paths)
    }

    fn database_path_with(&self, env_override: Option<PathBuf>, paths: &ChklstPaths) -> PathBuf {
        env_override
            .or_else(|| self.database_path.clone())
            .unwrap_or_else(|| paths.database_file())
    }

    /// Resolve the backup directory: settings, then the default
    pub fn backup_dir(&self, paths: &ChklstPaths) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(|| paths.backup_dir())
    }
}
