//! Book command handlers

use anyhow::{bail, Context, Result};

use shelf_core::{BookRecord, RecordStore};

use crate::editor::{confirm, is_interactive, prompt_with_default};
use crate::form::{BookForm, EditForm};
use crate::output::Output;

/// Add a new book
pub fn add(store: &mut RecordStore, form: BookForm, output: &Output) -> Result<()> {
    let book = form.into_new_book()?;
    let id = store.add(book).context("Failed to add book")?;

    let book = find(store, id)?;
    output.success(&format!("Added book: {}", id));
    output.print_book(&book);

    Ok(())
}

/// List all books
pub fn list(store: &RecordStore, output: &Output) -> Result<()> {
    output.print_books(&store.get_all());
    Ok(())
}

/// Show a single book
pub fn show(store: &RecordStore, id: u64, output: &Output) -> Result<()> {
    let book = find(store, id)?;
    output.print_book(&book);
    Ok(())
}

/// Edit a book
///
/// With no field flags, prompts for each field on an interactive terminal.
pub fn edit(store: &mut RecordStore, id: u64, form: EditForm, output: &Output) -> Result<()> {
    let current = find(store, id)?;

    let form = if form.is_empty() {
        if !(output.should_prompt() && is_interactive()) {
            bail!("Nothing to update. Pass at least one field, e.g. --quantity 5");
        }
        prompt_edit(&current)?
    } else {
        form
    };

    let update = form.into_update()?;
    if !store.update(id, update).context("Failed to update book")? {
        bail!("Book not found: {}", id);
    }

    let book = find(store, id)?;
    output.success("Book updated");
    output.print_book(&book);

    Ok(())
}

/// Delete a book
pub fn delete(store: &mut RecordStore, id: u64, yes: bool, output: &Output) -> Result<()> {
    let book = find(store, id)?;

    if !yes && output.should_prompt() {
        println!("Delete book: {} - {}", book.id, book.title);
        if !confirm("Are you sure?")? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    if !store.delete(id).context("Failed to delete book")? {
        bail!("Book not found: {}", id);
    }

    output.success(&format!("Deleted book: {}", id));

    Ok(())
}

/// Search books
pub fn search(store: &RecordStore, query: String, output: &Output) -> Result<()> {
    output.print_books(&store.search(&query));
    Ok(())
}

fn find(store: &RecordStore, id: u64) -> Result<BookRecord> {
    store
        .get_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("Book not found: {}", id))
}

/// Ask for each field, keeping the current value on an empty answer
fn prompt_edit(book: &BookRecord) -> Result<EditForm> {
    println!("Editing book: {}", book.id);
    println!("Press Enter to keep current value, or type new value.\n");

    Ok(EditForm {
        title: prompt_with_default("Title", &book.title)?,
        author: prompt_with_default("Author", &book.author)?,
        year: prompt_with_default("Year", &book.year.to_string())?,
        category: prompt_with_default("Category", &book.category)?,
        isbn: prompt_with_default("ISBN", &book.isbn)?,
        quantity: prompt_with_default("Quantity", &book.quantity.to_string())?,
        image: prompt_with_default("Cover image", &book.image_path)?,
    })
}
