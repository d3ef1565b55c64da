//! Backup system for chklst
//!
//! Byte-level snapshots of the deployment database, JSON export/import of the
//! library record, a retention sweep, and a scheduled auto-backup job.
//!
//! # Backup Directory
//!
//! All artifacts live flat in one directory:
//! - `chklst_backup_<YYYY-MM-DD_HH-MM-SS>.db`: database snapshot
//! - `pre_restore_<YYYY-MM-DD_HH-MM-SS>.db`: copy of the live database taken
//!   just before a restore overwrote it
//! - `settings_export_<YYYY-MM-DD_HH-MM-SS>.json`: library export
//!
//! A `_N` suffix is appended when two artifacts of the same kind are created
//! within the same second.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chklst::backup::BackupManager;
//!
//! let manager = Arc::new(BackupManager::new(backup_dir, storage.library_store())?);
//!
//! let backup_path = manager.backup_database(&db_path)?;
//! manager.restore_database(&backup_path, &db_path)?;
//!
//! let job = manager.start_auto_backup(&db_path, 24)?;
//! // ...
//! job.stop();
//! ```

mod manager;
mod restore;
mod schedule;
mod settings_io;

pub use manager::BackupManager;
pub use schedule::AutoBackup;

/// File name prefix of database snapshots
pub const DATABASE_BACKUP_PREFIX: &str = "chklst_backup";

/// File name prefix of the safety copy taken before a restore
pub const PRE_RESTORE_PREFIX: &str = "pre_restore";

/// File name prefix of settings exports
pub const SETTINGS_EXPORT_PREFIX: &str = "settings_export";

/// Timestamp embedded in artifact names (local time)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Extensions reported by `list_backups`
pub const BACKUP_EXTENSIONS: [&str; 2] = ["db", "json"];

/// Retention applied by each auto-backup tick
pub const AUTO_BACKUP_RETENTION_DAYS: u32 = 30;
