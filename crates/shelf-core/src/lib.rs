//! SHELF Core Library
//!
//! This crate provides the core functionality for SHELF, a personal book
//! catalog kept in a single CSV file.
//!
//! # Architecture
//!
//! - **RecordStore**: owns the collection in memory, rewrites the catalog
//!   file after every mutation
//! - **CSV catalog**: the only persistent state
//!
//! # Quick Start
//!
//! ```text
//! let mut store = RecordStore::open("data/library.csv")?;
//!
//! // Add a book
//! let id = store.add(NewBook::new("Dune", "Frank Herbert", 1965, "SciFi", "ISBN1", 3))?;
//!
//! // Query books
//! let hits = store.search("herbert");
//! let stats = store.statistics();
//! ```
//!
//! # Modules
//!
//! - `store`: the record store (main entry point)
//! - `models`: book record, creation and update inputs, statistics
//! - `storage`: CSV codec and file persistence
//! - `config`: application configuration

pub mod config;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use models::{BookRecord, BookUpdate, CatalogStatistics, NewBook};
pub use storage::{StorageError, StorageResult};
pub use store::{RecordStore, DEFAULT_CATALOG_PATH};
