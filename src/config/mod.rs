//! Configuration module for chklst
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ChklstPaths;
pub use settings::{AutoBackupSettings, Settings};
