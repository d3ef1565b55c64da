//! Storage layer for chklst
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. The deployment database itself is opaque to this crate; only the
//! library record is stored here.

pub mod file_io;
pub mod library;

pub use file_io::{read_json_optional, write_json_atomic};
pub use library::{LibraryRepository, LibraryStore};

use std::sync::Arc;

use crate::config::paths::ChklstPaths;
use crate::error::ChklstError;

/// Main storage coordinator
pub struct Storage {
    paths: ChklstPaths,
    pub library: Arc<LibraryRepository>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ChklstPaths) -> Result<Self, ChklstError> {
        paths.ensure_directories()?;

        Ok(Self {
            library: Arc::new(LibraryRepository::new(paths.library_file())),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ChklstPaths {
        &self.paths
    }

    /// Seed default records for a fresh installation
    pub fn initialize(&self) -> Result<(), ChklstError> {
        self.library.ensure_default()?;
        Ok(())
    }

    /// The library store as a trait object, for injection
    pub fn library_store(&self) -> Arc<dyn LibraryStore> {
        self.library.clone()
    }
}
