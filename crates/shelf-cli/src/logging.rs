//! Logging setup
//!
//! Logs go to stderr, or to `log_file` when configured. The level comes
//! from the SHELF_LOG environment variable, then `--verbose`, else warnings only.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use shelf_core::Config;

/// Install the global tracing subscriber
pub fn init(config: &Config, verbose: bool) {
    let level = std::env::var("SHELF_LOG")
        .ok()
        .filter(|level| !level.is_empty())
        .unwrap_or_else(|| if verbose { "debug" } else { "warn" }.to_string());

    let env_filter = EnvFilter::new(format!("shelf_core={},shelf_cli={}", level, level));

    if let Some(ref log_path) = config.log_file {
        match OpenOptions::new().create(true).append(true).open(log_path) {
            Ok(file) => {
                // Ignore error if already initialized
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
                debug!("Logging to {:?}", log_path);
                return;
            }
            Err(e) => {
                eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            }
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
