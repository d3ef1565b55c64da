//! Data models for chklst
//!
//! Only the library record lives here; projects, components and deployment
//! records belong to the database this crate backs up.

pub mod library;

pub use library::{Library, LibraryList, LIBRARY_ID};
