//! Settings export and import
//!
//! The library record is written to / read from indented JSON files in the
//! backup directory. Import replaces the stored record wholesale.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ChklstError, ChklstResult};
use crate::models::{Library, LIBRARY_ID};

use super::manager::{file_name, BackupManager};
use super::SETTINGS_EXPORT_PREFIX;

impl BackupManager {
    /// Export the library record to `settings_export_<timestamp>.json`
    pub fn export_settings(&self) -> ChklstResult<PathBuf> {
        let library = self.store.load_library().map_err(|e| match e {
            ChklstError::Storage(_) => e,
            other => ChklstError::Storage(format!("Failed to get library: {}", other)),
        })?;

        let (path, file) = self.create_artifact(SETTINGS_EXPORT_PREFIX, "json")?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &library)
            .map_err(|e| ChklstError::Json(format!("Failed to encode settings: {}", e)))?;
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(|e| ChklstError::Io(format!("Failed to write settings file: {}", e)))?;

        tracing::info!(
            file = %file_name(&path),
            path = %path.display(),
            "Settings exported successfully"
        );

        Ok(path)
    }

    /// Import a settings file, replacing the stored library record
    ///
    /// Every list is replaced; nothing is merged. The identifier is forced to
    /// the singleton id regardless of what the file says.
    pub fn import_settings(&self, file: &Path) -> ChklstResult<()> {
        if !file.exists() {
            return Err(ChklstError::settings_file_not_found(file.display().to_string()));
        }

        let reader = File::open(file).map(BufReader::new).map_err(|e| {
            ChklstError::Io(format!("Failed to open settings file {}: {}", file.display(), e))
        })?;

        let mut library: Library = serde_json::from_reader(reader).map_err(|e| {
            ChklstError::Json(format!("Failed to decode settings: {}", e))
        })?;
        library.id = LIBRARY_ID;

        self.store.save_library(&library)?;

        tracing::info!(from = %file.display(), "Settings imported successfully");

        Ok(())
    }
}
