//! CSV codec for the catalog file
//!
//! The catalog is a UTF-8 CSV file whose first line names the columns:
//!
//! ```text
//! ID,Title,Author,Year,Category,ISBN,Quantity,ImagePath
//! ```
//!
//! Columns are matched by header name when reading. `ImagePath` may be
//! missing entirely, in which case every record gets an empty image path.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{StorageError, StorageResult};
use crate::models::BookRecord;

/// Column names, in the order they are written
pub const HEADER: [&str; 8] = [
    "ID",
    "Title",
    "Author",
    "Year",
    "Category",
    "ISBN",
    "Quantity",
    "ImagePath",
];

/// Columns that must be present for a non-empty file to be readable
const REQUIRED_COLUMNS: [&str; 7] =
    ["ID", "Title", "Author", "Year", "Category", "ISBN", "Quantity"];

/// One line of the catalog file
#[derive(Debug, Serialize, Deserialize)]
struct CatalogRow {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Author")]
    author: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "ISBN")]
    isbn: String,
    #[serde(rename = "Quantity")]
    quantity: u32,
    #[serde(rename = "ImagePath", default)]
    image_path: String,
}

impl CatalogRow {
    fn from_record(book: &BookRecord) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
            category: book.category.clone(),
            isbn: book.isbn.clone(),
            quantity: book.quantity,
            image_path: book.image_path.clone(),
        }
    }

    fn into_record(self) -> BookRecord {
        BookRecord {
            id: self.id,
            title: self.title,
            author: self.author,
            year: self.year,
            category: self.category,
            isbn: self.isbn,
            quantity: self.quantity,
            image_path: self.image_path,
        }
    }
}

/// Serialize the full collection, header first
///
/// An empty collection produces a header-only file.
pub fn encode(books: &[BookRecord]) -> StorageResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for book in books {
        writer.serialize(CatalogRow::from_record(book))?;
    }

    writer
        .into_inner()
        .map_err(|e| StorageError::Io(e.into_error()))
}

/// Parse catalog bytes into records, preserving row order
///
/// A zero-byte input is an empty catalog. Any structural problem (missing
/// column, bad integer, ragged row, invalid UTF-8, non-positive or duplicate
/// ID) is reported as [`StorageError::InvalidFormat`].
pub fn decode(bytes: &[u8], path: &Path) -> StorageResult<Vec<BookRecord>> {
    let invalid = |details: String| StorageError::InvalidFormat {
        path: path.to_path_buf(),
        details,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader.headers().map_err(|e| invalid(e.to_string()))?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(invalid(format!("missing column(s): {}", missing.join(", "))));
    }

    let mut books = Vec::new();
    let mut seen = HashSet::new();
    for row in reader.deserialize::<CatalogRow>() {
        let row = row.map_err(|e| invalid(e.to_string()))?;
        if row.id == 0 {
            return Err(invalid("record with ID 0".to_string()));
        }
        if !seen.insert(row.id) {
            return Err(invalid(format!("duplicate ID {}", row.id)));
        }
        books.push(row.into_record());
    }

    Ok(books)
}
