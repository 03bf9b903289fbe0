//! Status command handler

use anyhow::Result;

use shelf_core::{Config, RecordStore};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &RecordStore, config: &Config, output: &Output) -> Result<()> {
    let recovered = store.recovered_from().map(|e| e.to_string());

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "catalog": store.path(),
                    "catalog_size": store.file_size(),
                    "books": store.len(),
                    "log_file": config.log_file,
                    "recovered_from": recovered,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.path().display());
        }
        OutputFormat::Human => {
            println!("SHELF Status");
            println!("============");
            println!();
            println!("Catalog:");
            println!("  Location: {}", store.path().display());
            println!("  Size:     {}", human_size(store.file_size()));
            println!("  Books:    {}", store.len());
            if let Some(ref log_file) = config.log_file {
                println!();
                println!("Log file: {}", log_file.display());
            }
            if let Some(ref problem) = recovered {
                println!();
                println!("Recovery:");
                println!("  {}", problem);
            }
        }
    }

    Ok(())
}

fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
