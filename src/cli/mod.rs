//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the backup manager and services.

pub mod backup;
pub mod library;

pub use backup::{handle_backup_command, BackupCommands};
pub use library::{handle_library_command, LibraryCommands};
