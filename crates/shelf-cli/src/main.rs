//! SHELF CLI
//!
//! Command-line interface for SHELF - a personal book catalog.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use shelf_core::{Config, RecordStore, StorageError};

mod commands;
mod editor;
mod form;
mod logging;
mod output;

use form::{BookForm, EditForm};
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "SHELF - Personal book catalog")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage books
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
    /// Show catalog statistics
    Stats,
    /// List all categories
    Categories,
    /// Show status (catalog location, size, record count)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum BookCommands {
    /// Add a new book
    #[command(alias = "create")]
    Add {
        #[arg(short = 'T', long)]
        title: String,
        #[arg(short, long)]
        author: String,
        #[arg(short, long, allow_hyphen_values = true)]
        year: String,
        #[arg(short, long)]
        category: String,
        #[arg(short, long)]
        isbn: String,
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        quantity: String,
        /// Cover image path
        #[arg(long)]
        image: Option<String>,
    },
    /// List all books
    #[command(alias = "ls")]
    List,
    /// Show book details
    Show {
        /// Book ID
        id: u64,
    },
    /// Edit a book (prompts for each field when no flags are given)
    Edit {
        /// Book ID
        id: u64,
        #[arg(short = 'T', long)]
        title: Option<String>,
        #[arg(short, long)]
        author: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        year: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        isbn: Option<String>,
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        quantity: Option<String>,
        /// Cover image path (empty string removes it)
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a book
    #[command(alias = "rm")]
    Delete {
        /// Book ID
        id: u64,
        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Search title, author, category and ISBN
    Search {
        /// Search query
        query: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, catalog_file, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let result = run(cli, &output);

    if let Err(ref e) = result {
        let storage_error = e
            .chain()
            .find_map(|cause| cause.downcast_ref::<StorageError>());
        if let Some(err) = storage_error {
            if let Some(hint) = err.recovery_suggestion() {
                eprintln!("Hint: {}", hint);
            }
            if err.is_recoverable() {
                eprintln!("The catalog file was left as it was. Run the command again once fixed.");
            }
        }
    }

    result
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    let config_path = cli.config.as_ref();

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return match command {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key.clone(), value.clone(), config_path, output)
            }
        };
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init(&config, cli.verbose);

    let mut store = open_store(&config, output)?;

    match cli.command {
        Commands::Book { command } => handle_book_command(command, &mut store, output),
        Commands::Stats => commands::stats::show(&store, output),
        Commands::Categories => commands::stats::categories(&store, output),
        Commands::Status => commands::status::show(&store, &config, output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_book_command(
    command: BookCommands,
    store: &mut RecordStore,
    output: &Output,
) -> Result<()> {
    match command {
        BookCommands::Add {
            title,
            author,
            year,
            category,
            isbn,
            quantity,
            image,
        } => {
            let form = BookForm {
                title,
                author,
                year,
                category,
                isbn,
                quantity,
                image,
            };
            commands::book::add(store, form, output)
        }
        BookCommands::List => commands::book::list(store, output),
        BookCommands::Show { id } => commands::book::show(store, id, output),
        BookCommands::Edit {
            id,
            title,
            author,
            year,
            category,
            isbn,
            quantity,
            image,
        } => {
            let form = EditForm {
                title,
                author,
                year,
                category,
                isbn,
                quantity,
                image,
            };
            commands::book::edit(store, id, form, output)
        }
        BookCommands::Delete { id, yes } => commands::book::delete(store, id, yes, output),
        BookCommands::Search { query } => commands::book::search(store, query, output),
    }
}

/// Open the catalog named by the configuration, reporting a recovered parse failure
fn open_store(config: &Config, output: &Output) -> Result<RecordStore> {
    let path = config.catalog_path();
    let store = RecordStore::open(&path)
        .with_context(|| format!("Failed to open catalog {:?}", path))?;

    if let Some(problem) = store.recovered_from() {
        if !output.is_quiet() {
            eprintln!("⚠ {}", problem);
            eprintln!("  Starting with an empty catalog.");
        }
    }

    Ok(store)
}
