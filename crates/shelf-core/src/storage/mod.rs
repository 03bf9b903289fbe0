//! Storage layer
//!
//! Handles persistence of the book collection as a flat CSV file.
//!
//! ## Architecture
//!
//! - **catalog**: CSV codec (header, column mapping, validation)
//! - **persistence**: file I/O with atomic full rewrites
//! - **error**: typed storage errors
//!
//! Every mutation rewrites the whole file; there is no incremental format.

pub mod catalog;
pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::CatalogFile;
