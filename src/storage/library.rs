//! Library repository for JSON storage
//!
//! Persists the singleton library record to library.json.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ChklstError;
use crate::models::{Library, LIBRARY_ID};

use super::file_io::{read_json_optional, write_json_atomic};

/// Read/overwrite access to the singleton library record
///
/// The backup manager receives one of these at construction so it never
/// reaches for a process-wide handle.
pub trait LibraryStore: Send + Sync {
    /// Read the library record
    fn load_library(&self) -> Result<Library, ChklstError>;

    /// Overwrite the library record wholesale
    fn save_library(&self, library: &Library) -> Result<(), ChklstError>;
}

/// Repository for library persistence
pub struct LibraryRepository {
    path: PathBuf,
    cache: RwLock<Option<Library>>,
}

impl LibraryRepository {
    /// Create a new library repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cache: RwLock::new(None),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Seed the default library if no record exists yet
    ///
    /// Returns true if a record was created.
    pub fn ensure_default(&self) -> Result<bool, ChklstError> {
        if self.path.exists() {
            return Ok(false);
        }

        self.save_library(&Library::with_defaults())?;
        tracing::info!(path = %self.path.display(), "Default library created");
        Ok(true)
    }

    fn read_from_disk(&self) -> Result<Library, ChklstError> {
        read_json_optional(&self.path)?.ok_or_else(|| {
            ChklstError::Storage(format!(
                "Library record not found in {}",
                self.path.display()
            ))
        })
    }
}

impl LibraryStore for LibraryRepository {
    fn load_library(&self) -> Result<Library, ChklstError> {
        {
            let cache = self.cache.read().map_err(|e| {
                ChklstError::Storage(format!("Failed to acquire read lock: {}", e))
            })?;
            if let Some(library) = cache.as_ref() {
                return Ok(library.clone());
            }
        }

        let library = self.read_from_disk()?;

        let mut cache = self.cache.write().map_err(|e| {
            ChklstError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *cache = Some(library.clone());

        Ok(library)
    }

    fn save_library(&self, library: &Library) -> Result<(), ChklstError> {
        let mut cache = self.cache.write().map_err(|e| {
            ChklstError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut record = library.clone();
        record.id = LIBRARY_ID;

        write_json_atomic(&self.path, &record)?;
        *cache = Some(record);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, LibraryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("library.json");
        (temp_dir, LibraryRepository::new(path))
    }

    #[test]
    fn test_load_missing_record_fails() {
        let (_temp, repo) = create_test_repo();
        let err = repo.load_library().unwrap_err();
        assert!(matches!(err, ChklstError::Storage(_)));
    }

    #[test]
    fn test_ensure_default_only_once() {
        let (_temp, repo) = create_test_repo();

        assert!(repo.ensure_default().unwrap());
        assert!(!repo.ensure_default().unwrap());

        let library = repo.load_library().unwrap();
        let defaults = Library::with_defaults();
        assert_eq!(library.developers, defaults.developers);
        assert_eq!(library.environments, defaults.environments);
    }

    #[test]
    fn test_save_forces_singleton_id() {
        let (_temp, repo) = create_test_repo();

        let mut library = Library::new();
        library.id = 42;
        library.developers.push("Asha".into());
        repo.save_library(&library).unwrap();

        let loaded = repo.load_library().unwrap();
        assert_eq!(loaded.id, LIBRARY_ID);
        assert_eq!(loaded.developers, vec!["Asha"]);
    }

    #[test]
    fn test_persists_across_instances() {
        let (_temp, repo) = create_test_repo();

        let mut library = Library::new();
        library.environments = vec!["Staging".into()];
        repo.save_library(&library).unwrap();

        let reopened = LibraryRepository::new(repo.path().clone());
        assert_eq!(reopened.load_library().unwrap().environments, vec!["Staging"]);
    }
}
