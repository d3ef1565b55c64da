//! Backup CLI commands
//!
//! Implements CLI commands for database backups and settings export/import.
//! Manager failures are reported to the user as a short "Failed to ..."
//! message; the detailed cause goes to the log.

use clap::Subcommand;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use crate::backup::{BackupManager, DATABASE_BACKUP_PREFIX};
use crate::config::paths::ChklstPaths;
use crate::config::settings::Settings;
use crate::error::{ChklstError, ChklstResult};
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Back up the database file
    Create,

    /// Restore the database from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Export library settings to JSON
    Export,

    /// Import library settings from a JSON export
    Import {
        /// Path to the settings file
        file: PathBuf,
    },

    /// List all available backups
    List {
        /// Show file sizes
        #[arg(short, long)]
        verbose: bool,
    },

    /// Delete backups older than the retention period
    Clean {
        /// Age in days (defaults to the configured retention)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Run scheduled backups until stdin is closed or Enter is pressed
    Auto {
        /// Hours between backups (defaults to the configured interval)
        #[arg(short, long)]
        interval_hours: Option<u64>,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &ChklstPaths,
    settings: &Settings,
    storage: &Storage,
    cmd: BackupCommands,
) -> ChklstResult<()> {
    let manager = served(
        "open backup directory",
        BackupManager::new(settings.backup_dir(paths), storage.library_store()),
    )?;
    let db_path = settings.database_path(paths);

    match cmd {
        BackupCommands::Create => {
            let backup_path = served("backup database", manager.backup_database(&db_path))?;
            println!("Database backed up successfully");
            println!("Location: {}", backup_path.display());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = served(
                "restore database",
                resolve_backup_path(&manager, &backup),
            )?;

            println!("Restore");
            println!("=======");
            println!("From: {}", backup_path.display());
            println!("To:   {}", db_path.display());
            println!();

            if !force {
                println!("WARNING: This will overwrite the current database!");
                println!("A pre_restore copy of the current file is kept in the backup directory.");
                println!("To proceed, run again with --force flag:");
                println!("  chklst backup restore {} --force", backup);
                return Ok(());
            }

            served(
                "restore database",
                manager.restore_database(&backup_path, &db_path),
            )?;
            println!("Database restored successfully");
        }

        BackupCommands::Export => {
            let file_path = served("export settings", manager.export_settings())?;
            println!("Settings exported successfully");
            println!("Location: {}", file_path.display());
        }

        BackupCommands::Import { file } => {
            served("import settings", manager.import_settings(&file))?;
            println!("Settings imported successfully");
        }

        BackupCommands::List { verbose } => {
            let backups = served("list backups", manager.list_backups())?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: chklst backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, name) in backups.iter().enumerate() {
                if verbose {
                    let size = std::fs::metadata(manager.backup_dir().join(name))
                        .map(|m| format_size(m.len()))
                        .unwrap_or_else(|_| "?".to_string());
                    println!("  {}. {} ({})", i + 1, name, size);
                } else {
                    println!("  {}. {}", i + 1, name);
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Clean { days } => {
            let days = days.unwrap_or(settings.retention_days);
            let removed = served("clean old backups", manager.clean_old_backups(days))?;
            println!("Removed {} file(s) older than {} day(s).", removed, days);
        }

        BackupCommands::Auto { interval_hours } => {
            let interval_hours = interval_hours.unwrap_or(settings.auto_backup.interval_hours);
            let manager = Arc::new(manager);
            let job = served(
                "start auto-backup",
                manager.start_auto_backup(db_path.clone(), interval_hours),
            )?;

            println!(
                "Backing up {} every {} hour(s). Press Enter to stop.",
                db_path.display(),
                interval_hours
            );

            if !stop_requested(std::io::stdin().lock()) {
                tracing::info!("stdin closed; auto-backup runs until the process is terminated");
                loop {
                    std::thread::park();
                }
            }

            job.stop();
            println!("Auto-backup stopped.");
        }
    }

    Ok(())
}

/// Block until a line is read from `input`
///
/// Returns false on end of input or a read error, where no stop request can
/// ever arrive.
fn stop_requested(mut input: impl BufRead) -> bool {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(n) => n > 0,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read stop request from stdin");
            false
        }
    }
}

/// Collapse a failure to a generic message, logging the cause
fn served<T>(operation: &'static str, result: ChklstResult<T>) -> ChklstResult<T> {
    result.map_err(|e| {
        tracing::error!(error = %e, "Failed to {}", operation);
        ChklstError::OperationFailed(operation)
    })
}

/// Resolve a backup identifier to a full path
///
/// Accepts `latest`, a path, or a file name inside the backup directory.
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> ChklstResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        // Timestamps sort lexicographically, and `_N` suffixes sort after the bare name
        let latest = manager
            .list_backups()?
            .into_iter()
            .filter(|name| name.starts_with(DATABASE_BACKUP_PREFIX) && name.ends_with(".db"))
            .max();

        return latest
            .map(|name| manager.backup_dir().join(name))
            .ok_or_else(|| ChklstError::backup_not_found("latest"));
    }

    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    let in_backup_dir = manager.backup_dir().join(backup);
    if in_backup_dir.exists() {
        return Ok(in_backup_dir);
    }

    Err(ChklstError::backup_not_found(backup))
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
