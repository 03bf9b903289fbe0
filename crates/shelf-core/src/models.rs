//! Data models for SHELF
//!
//! Defines the book record along with the inputs used to create and
//! update one, and the aggregate snapshot computed over the catalog.

use serde::{Deserialize, Serialize};

/// Label reported when there is no data to pick a frequent author from
pub const NO_DATA: &str = "N/A";

/// A book in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookRecord {
    /// Unique identifier, assigned by the store
    pub id: u64,
    pub title: String,
    pub author: String,
    /// Publication year
    pub year: i32,
    pub category: String,
    /// ISBN as entered (not format-validated)
    pub isbn: String,
    /// Number of copies on hand
    pub quantity: u32,
    /// Reference to a cover image file, empty when there is none
    #[serde(default)]
    pub image_path: String,
}

impl BookRecord {
    /// Check whether `needle` (already lowercased) occurs in any searchable field
    ///
    /// Searchable fields are title, author, category and ISBN.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        [&self.title, &self.author, &self.category, &self.isbn]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// Apply the fields present in `update`, leaving the rest untouched
    pub(crate) fn apply(&mut self, update: &BookUpdate) {
        if let Some(ref title) = update.title {
            self.title = title.clone();
        }
        if let Some(ref author) = update.author {
            self.author = author.clone();
        }
        if let Some(year) = update.year {
            self.year = year;
        }
        if let Some(ref category) = update.category {
            self.category = category.clone();
        }
        if let Some(ref isbn) = update.isbn {
            self.isbn = isbn.clone();
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(ref image_path) = update.image_path {
            self.image_path = image_path.clone();
        }
    }
}

/// Fields for a book that has not been added yet
///
/// The store assigns the identifier, so there is none here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub category: String,
    pub isbn: String,
    pub quantity: u32,
    pub image_path: String,
}

impl NewBook {
    /// Create a new book with no cover image
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        category: impl Into<String>,
        isbn: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            category: category.into(),
            isbn: isbn.into(),
            quantity,
            image_path: String::new(),
        }
    }

    /// Set the cover image reference
    pub fn with_image_path(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = image_path.into();
        self
    }

    pub(crate) fn into_record(self, id: u64) -> BookRecord {
        BookRecord {
            id,
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

/// A sparse set of field changes for an existing book
///
/// Only fields that are `Some` are written; the identifier can never change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub category: Option<String>,
    pub isbn: Option<String>,
    pub quantity: Option<u32>,
    pub image_path: Option<String>,
}

impl BookUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn image_path(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = Some(image_path.into());
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.year.is_none()
            && self.category.is_none()
            && self.isbn.is_none()
            && self.quantity.is_none()
            && self.image_path.is_none()
    }
}

/// Aggregate snapshot of the catalog, computed on demand
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CatalogStatistics {
    /// Number of records
    pub total_books: usize,
    /// Sum of all quantities
    pub total_quantity: u64,
    /// Number of distinct categories
    pub unique_categories: usize,
    /// Most common author, `None` for an empty catalog
    pub frequent_author: Option<String>,
}

impl CatalogStatistics {
    /// The frequent author, or `N/A` when the catalog is empty
    pub fn frequent_author_label(&self) -> &str {
        self.frequent_author.as_deref().unwrap_or(NO_DATA)
    }
}
