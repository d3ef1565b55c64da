//! Scheduled auto-backup
//!
//! Runs a database backup followed by a retention sweep on a fixed interval,
//! on a dedicated thread that is stopped and joined through [`AutoBackup`].

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::{ChklstError, ChklstResult};

use super::manager::BackupManager;
use super::AUTO_BACKUP_RETENTION_DAYS;

const SECONDS_PER_HOUR: u64 = 60 * 60;

impl BackupManager {
    /// Start backing up `db_path` every `interval_hours` hours
    ///
    /// Each tick backs up the database and then removes artifacts older than
    /// 30 days. Failures are logged and the schedule keeps running until the
    /// returned handle is stopped or dropped.
    pub fn start_auto_backup(
        self: &Arc<Self>,
        db_path: impl Into<PathBuf>,
        interval_hours: u64,
    ) -> ChklstResult<AutoBackup> {
        if interval_hours == 0 {
            return Err(ChklstError::Validation(
                "Auto-backup interval must be at least one hour".into(),
            ));
        }

        let interval = interval_hours
            .checked_mul(SECONDS_PER_HOUR)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                ChklstError::Validation(format!(
                    "Auto-backup interval too large: {} hours",
                    interval_hours
                ))
            })?;

        let job = AutoBackup::start(Arc::clone(self), db_path.into(), interval)?;
        tracing::info!(interval_hours, "Auto-backup started");
        Ok(job)
    }
}

/// Handle to a running auto-backup job
///
/// Dropping the handle stops the job and waits for the worker thread.
pub struct AutoBackup {
    interval: Duration,
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl AutoBackup {
    /// Spawn the worker thread with an arbitrary tick interval
    pub fn start(
        manager: Arc<BackupManager>,
        db_path: PathBuf,
        interval: Duration,
    ) -> ChklstResult<Self> {
        if interval.is_zero() {
            return Err(ChklstError::Validation(
                "Auto-backup interval must be greater than zero".into(),
            ));
        }

        let (stop_tx, stop_rx) = channel::<()>();

        let worker = thread::Builder::new()
            .name("chklst-auto-backup".into())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => run_tick(&manager, &db_path),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(|e| ChklstError::Io(format!("Failed to spawn auto-backup thread: {}", e)))?;

        Ok(Self {
            interval,
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        })
    }

    /// Time between two ticks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the worker thread is still alive
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().map_or(false, |w| !w.is_finished())
    }

    /// Stop the job and wait for an in-flight tick to finish
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("Auto-backup thread panicked");
            } else {
                tracing::info!("Auto-backup stopped");
            }
        }
    }
}

impl Drop for AutoBackup {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// One scheduled pass: backup, then sweep
fn run_tick(manager: &BackupManager, db_path: &Path) {
    if let Err(e) = manager.backup_database(db_path) {
        tracing::error!(error = %e, db_path = %db_path.display(), "Auto-backup failed");
    }

    if let Err(e) = manager.clean_old_backups(AUTO_BACKUP_RETENTION_DAYS) {
        tracing::error!(error = %e, "Failed to clean old backups");
    }
}
