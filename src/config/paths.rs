//! Path management for chklst
//!
//! Provides XDG-compliant path resolution for configuration, data, and backups.
//!
//! ## Path Resolution Order
//!
//! 1. `CHKLST_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/chklst` or `~/.config/chklst`
//! 3. Windows: `%APPDATA%\chklst`

use std::path::PathBuf;

use crate::error::ChklstError;

/// Manages all paths used by chklst
#[derive(Debug, Clone)]
pub struct ChklstPaths {
    /// Base directory for all chklst data
    base_dir: PathBuf,
}

impl ChklstPaths {
    /// Create a new ChklstPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ChklstError> {
        let base_dir = if let Ok(custom) = std::env::var("CHKLST_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create ChklstPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/chklst/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/chklst/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the default backup directory (~/.config/chklst/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the default path of the deployment database
    pub fn database_file(&self) -> PathBuf {
        self.base_dir.join("chklst.db")
    }

    /// Get the path to library.json (preset lists)
    pub fn library_file(&self) -> PathBuf {
        self.data_dir().join("library.json")
    }

    /// Ensure the base and data directories exist
    ///
    /// The backup directory is created by the backup manager itself, since
    /// settings may point it elsewhere.
    pub fn ensure_directories(&self) -> Result<(), ChklstError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ChklstError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| ChklstError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, ChklstError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                ChklstError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("chklst"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, ChklstError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| ChklstError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("chklst"))
}
