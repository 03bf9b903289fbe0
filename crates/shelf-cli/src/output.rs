//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use shelf_core::{BookRecord, CatalogStatistics};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single book
    pub fn print_book(&self, book: &BookRecord) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", book.id);
                println!("Title:    {}", book.title);
                println!("Author:   {}", book.author);
                println!("Year:     {}", book.year);
                println!("Category: {}", book.category);
                println!("ISBN:     {}", book.isbn);
                println!("Quantity: {}", book.quantity);
                if !book.image_path.is_empty() {
                    println!("Cover:    {}", book.image_path);
                }
            }
            OutputFormat::Json => print_json(book),
            OutputFormat::Quiet => {
                println!("{}", book.id);
            }
        }
    }

    /// Print a list of books as a table
    pub fn print_books(&self, books: &[BookRecord]) {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("No books found.");
                    return;
                }
                for book in books {
                    println!(
                        "{:>4} | {:<30} | {:<20} | {:>5} | {:<12} | {:>3}",
                        book.id,
                        truncate(&book.title, 30),
                        truncate(&book.author, 20),
                        book.year,
                        truncate(&book.category, 12),
                        book.quantity
                    );
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => print_json(&books),
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", book.id);
                }
            }
        }
    }

    /// Print catalog statistics with the per-category breakdown
    pub fn print_statistics(&self, stats: &CatalogStatistics, distribution: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                println!("Catalog Statistics");
                println!("==================");
                println!();
                println!("  Books:           {}", stats.total_books);
                println!("  Copies:          {}", stats.total_quantity);
                println!("  Categories:      {}", stats.unique_categories);
                println!("  Frequent author: {}", stats.frequent_author_label());

                if !distribution.is_empty() {
                    println!();
                    println!("── By category ──");
                    for (category, count) in distribution {
                        println!("{:<24} {}", truncate(category, 24), count);
                    }
                }
            }
            OutputFormat::Json => {
                let categories: Vec<_> = distribution
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                print_json(&serde_json::json!({
                    "total_books": stats.total_books,
                    "total_quantity": stats.total_quantity,
                    "unique_categories": stats.unique_categories,
                    "frequent_author": stats.frequent_author,
                    "categories": categories,
                }));
            }
            OutputFormat::Quiet => {
                println!("{}", stats.total_books);
            }
        }
    }

    /// Print a list of category names
    pub fn print_categories(&self, categories: &[String]) {
        match self.format {
            OutputFormat::Human => {
                if categories.is_empty() {
                    println!("No categories found.");
                    return;
                }
                for name in categories {
                    println!("{}", name);
                }
                let suffix = if categories.len() == 1 { "y" } else { "ies" };
                println!("\n{} categor{}", categories.len(), suffix);
            }
            OutputFormat::Json => print_json(&categories),
            OutputFormat::Quiet => {
                for name in categories {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON: {}", e),
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
