//! Backup manager for chklst
//!
//! Copies the deployment database into the backup directory, lists backup
//! artifacts, and sweeps out old ones.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local, TimeDelta, Utc};

use crate::error::{ChklstError, ChklstResult};
use crate::storage::LibraryStore;

use super::{BACKUP_EXTENSIONS, DATABASE_BACKUP_PREFIX, TIMESTAMP_FORMAT};

/// Upper bound on `_N` suffixes tried when a name is taken within one second
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Manages database snapshots, settings exports and retention
pub struct BackupManager {
    /// Path to backup directory
    pub(super) backup_dir: PathBuf,
    /// Store holding the library record
    pub(super) store: Arc<dyn LibraryStore>,
}

impl BackupManager {
    /// Create a new BackupManager, creating the backup directory if needed
    pub fn new(backup_dir: impl Into<PathBuf>, store: Arc<dyn LibraryStore>) -> ChklstResult<Self> {
        let backup_dir = backup_dir.into();

        fs::create_dir_all(&backup_dir).map_err(|e| {
            tracing::error!(backup_dir = %backup_dir.display(), error = %e, "Failed to create backup directory");
            ChklstError::Io(format!(
                "Failed to create backup directory {}: {}",
                backup_dir.display(),
                e
            ))
        })?;

        Ok(Self { backup_dir, store })
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Copy the database file at `source` into the backup directory
    ///
    /// Returns the path to the created `chklst_backup_<timestamp>.db` file.
    pub fn backup_database(&self, source: &Path) -> ChklstResult<PathBuf> {
        let backup_path = self.copy_to_artifact(source, DATABASE_BACKUP_PREFIX, "db")?;

        tracing::info!(
            backup_file = %file_name(&backup_path),
            backup_path = %backup_path.display(),
            "Database backed up successfully"
        );

        Ok(backup_path)
    }

    /// List backup artifacts (`.db` and `.json` files) in directory order
    pub fn list_backups(&self) -> ChklstResult<Vec<String>> {
        let entries = fs::read_dir(&self.backup_dir).map_err(|e| {
            ChklstError::Io(format!("Failed to read backup directory: {}", e))
        })?;

        let mut backups = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| {
                ChklstError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            let file_type = entry.file_type().map_err(|e| {
                ChklstError::Io(format!("Failed to read directory entry: {}", e))
            })?;
            if file_type.is_dir() {
                continue;
            }

            let path = entry.path();
            let is_backup = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| BACKUP_EXTENSIONS.contains(&ext));

            if is_backup {
                backups.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(backups)
    }

    /// Remove every file in the backup directory last modified more than
    /// `days_to_keep` days ago
    ///
    /// Returns the number of files removed.
    pub fn clean_old_backups(&self, days_to_keep: u32) -> ChklstResult<usize> {
        self.clean_old_backups_at(days_to_keep, Utc::now())
    }

    /// Retention sweep against an explicit reference time
    ///
    /// Extensions are ignored. Files whose metadata cannot be read or which
    /// cannot be removed are logged and skipped.
    pub fn clean_old_backups_at(&self, days_to_keep: u32, now: DateTime<Utc>) -> ChklstResult<usize> {
        self.sweep_older_than(days_to_keep, now, |path| fs::remove_file(path))
    }

    fn sweep_older_than<F>(&self, days_to_keep: u32, now: DateTime<Utc>, mut remove: F) -> ChklstResult<usize>
    where
        F: FnMut(&Path) -> io::Result<()>,
    {
        let entries = fs::read_dir(&self.backup_dir).map_err(|e| {
            ChklstError::Io(format!("Failed to read backup directory: {}", e))
        })?;

        // A window reaching past chrono's minimum date keeps everything
        let Some(cutoff) = TimeDelta::try_days(i64::from(days_to_keep))
            .and_then(|keep| now.checked_sub_signed(keep))
        else {
            tracing::info!(removed = 0, older_than_days = days_to_keep, "Cleaned old backups");
            return Ok(0);
        };

        let mut removed = 0;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read backup directory entry; skipping");
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().to_string();

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "Failed to read backup metadata; skipping");
                    continue;
                }
            };
            if metadata.is_dir() {
                continue;
            }

            let modified = match metadata.modified() {
                Ok(time) => DateTime::<Utc>::from(time),
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "Failed to read backup modification time; skipping");
                    continue;
                }
            };

            if modified < cutoff {
                match remove(&entry.path()) {
                    Ok(()) => removed += 1,
                    Err(e) => tracing::warn!(file = %name, error = %e, "Failed to remove old backup; skipping"),
                }
            }
        }

        tracing::info!(removed, older_than_days = days_to_keep, "Cleaned old backups");

        Ok(removed)
    }

    /// Copy `source` byte-for-byte into a fresh artifact `<prefix>_<ts>.<ext>`
    pub(super) fn copy_to_artifact(&self, source: &Path, prefix: &str, ext: &str) -> ChklstResult<PathBuf> {
        let mut source_file = File::open(source).map_err(|e| {
            ChklstError::Io(format!(
                "Failed to open source database {}: {}",
                source.display(),
                e
            ))
        })?;

        let (dest_path, mut dest_file) = self.create_artifact(prefix, ext)?;

        io::copy(&mut source_file, &mut dest_file).map_err(|e| {
            ChklstError::Io(format!("Failed to copy database: {}", e))
        })?;
        dest_file.sync_all().map_err(|e| {
            ChklstError::Io(format!("Failed to sync {}: {}", dest_path.display(), e))
        })?;

        Ok(dest_path)
    }

    /// Create a new, uniquely named artifact file in the backup directory
    ///
    /// Names are `<prefix>_<YYYY-MM-DD_HH-MM-SS>.<ext>`; if that name is taken
    /// a `_1`, `_2`, ... suffix is added. Existing files are never reused.
    pub(super) fn create_artifact(&self, prefix: &str, ext: &str) -> ChklstResult<(PathBuf, File)> {
        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let filename = if attempt == 0 {
                format!("{}_{}.{}", prefix, stamp, ext)
            } else {
                format!("{}_{}_{}.{}", prefix, stamp, attempt, ext)
            };
            let path = self.backup_dir.join(&filename);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(ChklstError::Io(format!(
                        "Failed to create backup file {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        Err(ChklstError::Io(format!(
            "No free backup file name for {}_{}.{}",
            prefix, stamp, ext
        )))
    }
}

/// File name of `path` for log output
pub(super) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
