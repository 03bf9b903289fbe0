//! Input validation for book fields
//!
//! The store accepts whatever it is given, so everything typed by the user
//! is checked here first: text is trimmed, required text must be non-empty,
//! year and quantity must be whole numbers.

use anyhow::{bail, Context, Result};

use shelf_core::{BookUpdate, NewBook};

/// Raw fields for a new book, as typed by the user
#[derive(Debug, Clone, Default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub year: String,
    pub category: String,
    pub isbn: String,
    pub quantity: String,
    pub image: Option<String>,
}

impl BookForm {
    /// Validate every field and build the book to add
    pub fn into_new_book(self) -> Result<NewBook> {
        let title = required("Title", &self.title)?;
        let author = required("Author", &self.author)?;
        let category = required("Category", &self.category)?;
        let isbn = required("ISBN", &self.isbn)?;
        let year = parse_year(&self.year)?;
        let quantity = parse_quantity(&self.quantity)?;

        let mut book = NewBook::new(title, author, year, category, isbn, quantity);
        if let Some(image) = self.image {
            book = book.with_image_path(image.trim());
        }
        Ok(book)
    }
}

/// Raw optional fields for an edit; `None` means "keep current value"
#[derive(Debug, Clone, Default)]
pub struct EditForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<String>,
    pub category: Option<String>,
    pub isbn: Option<String>,
    pub quantity: Option<String>,
    pub image: Option<String>,
}

impl EditForm {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.year.is_none()
            && self.category.is_none()
            && self.isbn.is_none()
            && self.quantity.is_none()
            && self.image.is_none()
    }

    /// Validate the fields that were given and build a sparse update
    pub fn into_update(self) -> Result<BookUpdate> {
        let mut update = BookUpdate::new();

        if let Some(ref title) = self.title {
            update = update.title(required("Title", title)?);
        }
        if let Some(ref author) = self.author {
            update = update.author(required("Author", author)?);
        }
        if let Some(ref year) = self.year {
            update = update.year(parse_year(year)?);
        }
        if let Some(ref category) = self.category {
            update = update.category(required("Category", category)?);
        }
        if let Some(ref isbn) = self.isbn {
            update = update.isbn(required("ISBN", isbn)?);
        }
        if let Some(ref quantity) = self.quantity {
            update = update.quantity(parse_quantity(quantity)?);
        }
        // An empty image path is allowed: it removes the cover
        if let Some(ref image) = self.image {
            update = update.image_path(image.trim());
        }

        Ok(update)
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        bail!("{} is required", field);
    }
    Ok(value.to_string())
}

fn parse_year(value: &str) -> Result<i32> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Year must be a whole number, got '{}'", value.trim()))
}

fn parse_quantity(value: &str) -> Result<u32> {
    value.trim().parse().with_context(|| {
        format!(
            "Quantity must be a non-negative whole number, got '{}'",
            value.trim()
        )
    })
}
