//! Record store
//!
//! The `RecordStore` owns the book collection and keeps the catalog file in
//! step with it. The whole collection lives in memory in insertion order;
//! every successful mutation rewrites the catalog before returning.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = RecordStore::open("data/library.csv")?;
//!
//! let id = store.add(NewBook::new("Dune", "Frank Herbert", 1965, "SciFi", "ISBN1", 3))?;
//! store.update(id, BookUpdate::new().quantity(5))?;
//!
//! let hits = store.search("herbert");
//! ```
//!
//! If a mutation fails to persist, the in-memory collection is restored to
//! what was last written and the error is returned.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use tracing::{info, warn};

use crate::models::{BookRecord, BookUpdate, CatalogStatistics, NewBook};
use crate::storage::{CatalogFile, StorageError, StorageResult};

/// Catalog location used by [`RecordStore::open_default`]
pub const DEFAULT_CATALOG_PATH: &str = "data/library.csv";

/// Owns the book collection and its backing file
pub struct RecordStore {
    /// Records in insertion order
    books: Vec<BookRecord>,
    /// Catalog file handler
    file: CatalogFile,
    /// Highest identifier handed out or loaded during this session
    last_id: u64,
    /// Set when the catalog could not be parsed at startup
    recovered_from: Option<StorageError>,
}

impl RecordStore {
    /// Open the catalog at the default relative location
    pub fn open_default() -> StorageResult<Self> {
        Self::open(DEFAULT_CATALOG_PATH)
    }

    /// Open the catalog at `path`
    ///
    /// - Existing file: loaded in row order.
    /// - Missing file: parent directories and a header-only file are created.
    /// - Unparsable file: a backup copy is taken, the file itself is left
    ///   alone, and the store starts empty. See [`RecordStore::recovered_from`].
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let file = CatalogFile::new(path.as_ref());
        let mut recovered_from = None;

        let books = match file.load() {
            Ok(Some(books)) => {
                info!("Loaded {} record(s) from {:?}", books.len(), file.path());
                books
            }
            Ok(None) => {
                file.save(&[])?;
                info!("Created empty catalog at {:?}", file.path());
                Vec::new()
            }
            Err(StorageError::InvalidFormat { path, details }) => {
                warn!("Catalog {:?} could not be parsed: {}", path, details);
                recovered_from = Some(match file.backup_corrupt() {
                    Ok(backup_path) => {
                        warn!("Copied unreadable catalog to {:?}", backup_path);
                        StorageError::CorruptCatalog {
                            path,
                            backup_path,
                            details,
                        }
                    }
                    Err(e) => {
                        warn!("Could not back up unreadable catalog: {}", e);
                        StorageError::InvalidFormat { path, details }
                    }
                });
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let last_id = books.iter().map(|b| b.id).max().unwrap_or(0);

        Ok(Self {
            books,
            file,
            last_id,
            recovered_from,
        })
    }

    /// Path of the backing catalog file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Size of the backing file in bytes
    pub fn file_size(&self) -> u64 {
        self.file.size()
    }

    /// The parse failure this store recovered from at startup, if any
    pub fn recovered_from(&self) -> Option<&StorageError> {
        self.recovered_from.as_ref()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    // ==================== Mutations ====================

    /// Add a book and return its new identifier
    ///
    /// Field contents are stored as given.
    pub fn add(&mut self, book: NewBook) -> StorageResult<u64> {
        let id = self.next_id()?;
        self.books.push(book.into_record(id));

        if let Err(e) = self.persist() {
            self.books.pop();
            return Err(e);
        }

        self.last_id = id;
        Ok(id)
    }

    /// Apply a sparse update to the book with `id`
    ///
    /// Returns `Ok(false)` without touching the file if no such book exists.
    pub fn update(&mut self, id: u64, update: BookUpdate) -> StorageResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let previous = self.books[index].clone();
        self.books[index].apply(&update);

        if let Err(e) = self.persist() {
            self.books[index] = previous;
            return Err(e);
        }

        Ok(true)
    }

    /// Remove the book with `id`
    ///
    /// Returns `Ok(false)` without touching the file if no such book exists.
    pub fn delete(&mut self, id: u64) -> StorageResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let removed = self.books.remove(index);

        if let Err(e) = self.persist() {
            self.books.insert(index, removed);
            return Err(e);
        }

        Ok(true)
    }

    // ==================== Queries ====================

    /// Copy of every record in stored order
    pub fn get_all(&self) -> Vec<BookRecord> {
        self.books.clone()
    }

    /// Copy of the record with `id`
    pub fn get_by_id(&self, id: u64) -> Option<BookRecord> {
        self.books.iter().find(|b| b.id == id).cloned()
    }

    /// Case-insensitive substring search over title, author, category and ISBN
    ///
    /// An empty query matches every record.
    pub fn search(&self, query: &str) -> Vec<BookRecord> {
        let needle = query.to_lowercase();
        self.books
            .iter()
            .filter(|b| b.matches(&needle))
            .cloned()
            .collect()
    }

    /// Aggregate snapshot of the current collection
    pub fn statistics(&self) -> CatalogStatistics {
        let unique_categories = self
            .books
            .iter()
            .map(|b| b.category.as_str())
            .collect::<HashSet<_>>()
            .len();

        // Strict comparison keeps the first-seen author on ties
        let mut frequent: Option<(&str, usize)> = None;
        for (author, count) in count_first_seen(self.books.iter().map(|b| b.author.as_str())) {
            if frequent.map_or(true, |(_, best)| count > best) {
                frequent = Some((author, count));
            }
        }

        CatalogStatistics {
            total_books: self.books.len(),
            total_quantity: self.books.iter().map(|b| u64::from(b.quantity)).sum(),
            unique_categories,
            frequent_author: frequent.map(|(author, _)| author.to_string()),
        }
    }

    /// Distinct categories in ascending lexicographic order
    pub fn categories(&self) -> Vec<String> {
        self.books
            .iter()
            .map(|b| b.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Number of books per category, most common first
    ///
    /// Categories with equal counts keep the order in which they first appear.
    pub fn category_distribution(&self) -> Vec<(String, usize)> {
        let mut counts = count_first_seen(self.books.iter().map(|b| b.category.as_str()));
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .map(|(category, count)| (category.to_string(), count))
            .collect()
    }

    // ==================== Internals ====================

    fn position(&self, id: u64) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }

    /// One past the highest identifier seen this session
    ///
    /// Tracking `last_id` keeps identifiers of deleted books from coming back
    /// when the highest one is removed.
    fn next_id(&self) -> StorageResult<u64> {
        let max_present = self.books.iter().map(|b| b.id).max().unwrap_or(0);
        let last_id = self.last_id.max(max_present);
        last_id
            .checked_add(1)
            .ok_or(StorageError::IdSpaceExhausted { last_id })
    }

    fn persist(&self) -> StorageResult<()> {
        self.file.save(&self.books)
    }
}

/// Count occurrences, keeping values in first-seen order
fn count_first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts
}
