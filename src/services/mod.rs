//! Service layer for chklst
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation and record updates.

pub mod library;

pub use library::LibraryService;
