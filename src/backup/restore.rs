//! Database restoration for chklst
//!
//! Overwrites the live database file with the contents of a backup.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::{ChklstError, ChklstResult};

use super::manager::{file_name, BackupManager};
use super::PRE_RESTORE_PREFIX;

impl BackupManager {
    /// Restore the database at `target` from the backup at `backup`
    ///
    /// If `target` already exists it is first copied to
    /// `pre_restore_<timestamp>.db` in the backup directory. That safety copy
    /// is best effort: when it fails a warning is logged and the restore
    /// still goes ahead.
    pub fn restore_database(&self, backup: &Path, target: &Path) -> ChklstResult<()> {
        if !backup.exists() {
            return Err(ChklstError::backup_not_found(backup.display().to_string()));
        }

        if !backup.is_file() {
            return Err(ChklstError::Validation(format!(
                "Backup is not a regular file: {}",
                backup.display()
            )));
        }

        if is_same_file(backup, target) {
            return Err(ChklstError::Validation(format!(
                "Backup and restore target are the same file: {}",
                target.display()
            )));
        }

        if target.exists() {
            match self.copy_to_artifact(target, PRE_RESTORE_PREFIX, "db") {
                Ok(safety_copy) => tracing::info!(
                    backup_file = %file_name(&safety_copy),
                    "Current database backed up before restore"
                ),
                Err(e) => tracing::warn!(
                    target = %target.display(),
                    error = %e,
                    "Pre-restore safety copy failed; continuing restore"
                ),
            }
        }

        let mut source = File::open(backup).map_err(|e| {
            ChklstError::Io(format!("Failed to open backup file {}: {}", backup.display(), e))
        })?;

        let mut dest = File::create(target).map_err(|e| {
            ChklstError::Io(format!(
                "Failed to create target database {}: {}",
                target.display(),
                e
            ))
        })?;

        io::copy(&mut source, &mut dest)
            .map_err(|e| ChklstError::Io(format!("Failed to restore database: {}", e)))?;
        dest.sync_all()
            .map_err(|e| ChklstError::Io(format!("Failed to restore database: {}", e)))?;

        tracing::info!(
            from = %backup.display(),
            to = %target.display(),
            "Database restored successfully"
        );

        Ok(())
    }
}

/// Whether both paths resolve to the same existing file
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::backup::test_support::{create_test_manager, sha256_file};
    use crate::error::ChklstError;
    use std::fs;

    fn pre_restore_count(names: &[String]) -> usize {
        names.iter().filter(|n| n.starts_with("pre_restore_")).count()
    }

    #[test]
    fn test_restore_overwrites_target() {
        let (manager, temp) = create_test_manager();
        let db = temp.path().join("chklst.db");
        fs::write(&db, b"version one").unwrap();
        let backup = manager.backup_database(&db).unwrap();

        fs::write(&db, b"version two, longer than the first").unwrap();
        manager.restore_database(&backup, &db).unwrap();

        assert_eq!(fs::read(&db).unwrap(), b"version one");
        assert_eq!(sha256_file(&db), sha256_file(&backup));
    }

    #[test]
    fn test_restore_twice_gives_same_contents() {
        let (manager, temp) = create_test_manager();
        let db = temp.path().join("chklst.db");
        fs::write(&db, b"snapshot").unwrap();
        let backup = manager.backup_database(&db).unwrap();

        fs::write(&db, b"drifted").unwrap();
        manager.restore_database(&backup, &db).unwrap();
        let first = fs::read(&db).unwrap();

        manager.restore_database(&backup, &db).unwrap();
        let second = fs::read(&db).unwrap();

        assert_eq!(first, second);
        assert_eq!(second, b"snapshot");
    }

    #[test]
    fn test_restore_onto_existing_target_adds_one_safety_copy() {
        let (manager, temp) = create_test_manager();
        let db = temp.path().join("chklst.db");
        fs::write(&db, b"old").unwrap();
        let backup = manager.backup_database(&db).unwrap();
        fs::write(&db, b"current state").unwrap();

        let before = pre_restore_count(&manager.list_backups().unwrap());
        manager.restore_database(&backup, &db).unwrap();
        let after = manager.list_backups().unwrap();

        assert_eq!(pre_restore_count(&after), before + 1);

        let safety = after
            .iter()
            .find(|n| n.starts_with("pre_restore_"))
            .unwrap();
        assert_eq!(
            fs::read(manager.backup_dir().join(safety)).unwrap(),
            b"current state"
        );
    }

    #[test]
    fn test_restore_onto_missing_target_makes_no_safety_copy() {
        let (manager, temp) = create_test_manager();
        let db = temp.path().join("chklst.db");
        fs::write(&db, b"data").unwrap();
        let backup = manager.backup_database(&db).unwrap();
        fs::remove_file(&db).unwrap();

        manager.restore_database(&backup, &db).unwrap();

        assert_eq!(fs::read(&db).unwrap(), b"data");
        assert_eq!(pre_restore_count(&manager.list_backups().unwrap()), 0);
    }

    #[test]
    fn test_restore_missing_backup_is_not_found() {
        let (manager, temp) = create_test_manager();
        let db = temp.path().join("chklst.db");
        fs::write(&db, b"untouched").unwrap();

        let err = manager
            .restore_database(&temp.path().join("nope.db"), &db)
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(fs::read(&db).unwrap(), b"untouched");
    }

    #[test]
    fn test_restore_continues_when_safety_copy_fails() {
        let (manager, temp) = create_test_manager();
        let db = temp.path().join("chklst.db");
        fs::write(&db, b"from backup").unwrap();
        let backup = manager.backup_database(&db).unwrap();

        // A directory as target exists but cannot be opened as a file, so the
        // safety copy fails; the overwrite fails too and reports Io.
        let dir_target = temp.path().join("dir_target");
        fs::create_dir(&dir_target).unwrap();
        let err = manager.restore_database(&backup, &dir_target).unwrap_err();
        assert!(matches!(err, ChklstError::Io(_)));

        // With the backup directory removed the safety copy cannot be
        // created, yet the restore itself succeeds.
        fs::write(&db, b"live").unwrap();
        let backup_copy = temp.path().join("kept.db");
        fs::copy(&backup, &backup_copy).unwrap();
        fs::remove_dir_all(manager.backup_dir()).unwrap();

        manager.restore_database(&backup_copy, &db).unwrap();
        assert_eq!(fs::read(&db).unwrap(), b"from backup");
    }

    #[test]
    fn test_restore_onto_itself_is_rejected() {
        let (manager, temp) = create_test_manager();
        let db = temp.path().join("chklst.db");
        fs::write(&db, b"precious").unwrap();

        let err = manager.restore_database(&db, &db).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(fs::read(&db).unwrap(), b"precious");
    }

    #[test]
    fn test_restore_from_directory_leaves_target_intact() {
        let (manager, temp) = create_test_manager();
        let db = temp.path().join("chklst.db");
        fs::write(&db, b"live data").unwrap();
        let dir_backup = manager.backup_dir().join("chklst_backup_dir.db");
        fs::create_dir(&dir_backup).unwrap();

        let err = manager.restore_database(&dir_backup, &db).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(fs::read(&db).unwrap(), b"live data");
        assert_eq!(pre_restore_count(&manager.list_backups().unwrap()), 0);
    }
}
