//! chklst - deployment checklist backend utilities
//!
//! This library provides the backup side of the chklst deployment tracker:
//! database snapshots and restores, JSON export/import of the library
//! presets, a retention sweep and a scheduled auto-backup job.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: tracing subscriber setup
//! - `models`: The library record
//! - `storage`: JSON file storage for the library record
//! - `services`: Library maintenance
//! - `backup`: Backup management
//! - `cli`: Command handlers for the `chklst` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use chklst::backup::BackupManager;
//! use chklst::config::{paths::ChklstPaths, settings::Settings};
//! use chklst::storage::Storage;
//!
//! let paths = ChklstPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths.clone())?;
//! let manager = BackupManager::new(settings.backup_dir(&paths), storage.library_store())?;
//! let backup = manager.backup_database(&settings.database_path(&paths))?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ChklstError, ChklstResult};
