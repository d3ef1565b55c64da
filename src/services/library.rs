//! Library service
//!
//! Business logic for maintaining the preset lists offered when recording a
//! deployment.

use crate::error::{ChklstError, ChklstResult};
use crate::models::{Library, LibraryList};
use crate::storage::LibraryStore;

/// Service for library management
pub struct LibraryService<'a> {
    store: &'a dyn LibraryStore,
}

impl<'a> LibraryService<'a> {
    /// Create a new library service
    pub fn new(store: &'a dyn LibraryStore) -> Self {
        Self { store }
    }

    /// Get the library record
    pub fn get(&self) -> ChklstResult<Library> {
        self.store.load_library()
    }

    /// Add a value to one of the preset lists
    pub fn add(&self, list: LibraryList, value: &str) -> ChklstResult<Library> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ChklstError::Validation(format!(
                "{} name cannot be empty",
                list.entity_label()
            )));
        }

        let mut library = self.store.load_library()?;

        if library.list(list).iter().any(|v| v == value) {
            return Err(ChklstError::Duplicate {
                entity_type: list.entity_label(),
                identifier: value.to_string(),
            });
        }

        library.list_mut(list).push(value.to_string());
        library.touch();
        self.store.save_library(&library)?;

        tracing::info!(list = %list, value, "Library entry added");
        Ok(library)
    }

    /// Remove a value from one of the preset lists
    ///
    /// Removing a value that is not present leaves the record unchanged.
    pub fn remove(&self, list: LibraryList, value: &str) -> ChklstResult<Library> {
        let mut library = self.store.load_library()?;

        let entries = library.list_mut(list);
        let before = entries.len();
        entries.retain(|v| v != value);
        let removed = before - entries.len();

        if removed > 0 {
            library.touch();
            self.store.save_library(&library)?;
            tracing::info!(list = %list, value, "Library entry removed");
        } else {
            tracing::debug!(list = %list, value, "Library entry not present");
        }

        Ok(library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LibraryRepository;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, LibraryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = LibraryRepository::new(temp_dir.path().join("library.json"));
        repo.ensure_default().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_add_entry() {
        let (_temp, repo) = create_test_repo();
        let service = LibraryService::new(&repo);

        let library = service.add(LibraryList::DeployServers, "  10.0.0.7 ").unwrap();
        assert_eq!(library.deploy_servers, vec!["10.0.0.7"]);
        assert_eq!(service.get().unwrap().deploy_servers, vec!["10.0.0.7"]);
    }

    #[test]
    fn test_add_duplicate_fails() {
        let (_temp, repo) = create_test_repo();
        let service = LibraryService::new(&repo);

        let err = service.add(LibraryList::Developers, "Kannan").unwrap_err();
        assert!(matches!(err, ChklstError::Duplicate { .. }));
        assert_eq!(err.to_string(), "Developer already exists: Kannan");
    }

    #[test]
    fn test_add_empty_fails() {
        let (_temp, repo) = create_test_repo();
        let service = LibraryService::new(&repo);

        let err = service.add(LibraryList::Environments, "   ").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_remove_entry() {
        let (_temp, repo) = create_test_repo();
        let service = LibraryService::new(&repo);

        let library = service.remove(LibraryList::Environments, "UAT").unwrap();
        assert_eq!(library.environments, vec!["QA", "Production"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (_temp, repo) = create_test_repo();
        let service = LibraryService::new(&repo);
        let before = service.get().unwrap();

        let after = service.remove(LibraryList::Developers, "Nobody").unwrap();
        assert_eq!(before, after);
    }
}
