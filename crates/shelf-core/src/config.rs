//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/shelf/config.toml)
//! 3. Environment variables (SHELF_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::store::DEFAULT_CATALOG_PATH;

/// Environment variable prefix
const ENV_PREFIX: &str = "SHELF";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the catalog file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Catalog file name inside `data_dir`
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    /// Write logs here instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog_file: default_catalog_file(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (SHELF_DATA_DIR, SHELF_CATALOG_FILE, SHELF_LOG_FILE)
    /// 2. Config file (~/.config/shelf/config.toml or SHELF_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_CATALOG_FILE", ENV_PREFIX)) {
            if !val.is_empty() {
                self.catalog_file = val;
            }
        }

        // Empty string clears it
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with SHELF_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shelf")
            .join("config.toml")
    }

    /// Get the path to the catalog CSV file
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_file)
    }
}

fn default_data_dir() -> PathBuf {
    Path::new(DEFAULT_CATALOG_PATH)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_catalog_file() -> String {
    Path::new(DEFAULT_CATALOG_PATH)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "library.csv".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "SHELF_DATA_DIR",
        "SHELF_CATALOG_FILE",
        "SHELF_LOG_FILE",
        "SHELF_CONFIG",
    ];

    #[test]
    fn test_default_catalog_path() {
        let config = Config::default();
        assert_eq!(config.catalog_path(), PathBuf::from("data/library.csv"));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("SHELF_DATA_DIR", "/tmp/shelf-test");
        config.apply_env_overrides();

        assert_eq!(config.catalog_path(), PathBuf::from("/tmp/shelf-test/library.csv"));
    }

    #[test]
    fn test_env_override_catalog_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("SHELF_CATALOG_FILE", "books.csv");
        config.apply_env_overrides();
        assert_eq!(config.catalog_file, "books.csv");

        // Empty value keeps the current name
        env::set_var("SHELF_CATALOG_FILE", "");
        config.apply_env_overrides();
        assert_eq!(config.catalog_file, "books.csv");
    }

    #[test]
    fn test_env_override_log_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("SHELF_LOG_FILE", "/tmp/shelf.log");
        config.apply_env_overrides();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/shelf.log")));

        env::set_var("SHELF_LOG_FILE", "");
        config.apply_env_overrides();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            catalog_file = "books.csv"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.catalog_path(), PathBuf::from("/custom/data/books.csv"));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_load_from_str_partial_uses_defaults() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config::load_from_str("log_file = \"shelf.log\"").unwrap();
        assert_eq!(config.catalog_path(), PathBuf::from("data/library.csv"));
        assert_eq!(config.log_file, Some(PathBuf::from("shelf.log")));
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config::load_from_path(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.catalog_path(), PathBuf::from("data/library.csv"));
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shelf").join("config.toml");

        let config = Config {
            data_dir: PathBuf::from("/srv/books"),
            catalog_file: "catalog.csv".to_string(),
            log_file: Some(PathBuf::from("/var/log/shelf.log")),
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.data_dir, config.data_dir);
        assert_eq!(loaded.catalog_file, config.catalog_file);
        assert_eq!(loaded.log_file, config.log_file);
    }

    #[test]
    fn test_save_writes_to_config_file_path() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        env::set_var("SHELF_CONFIG", &path);

        let config = Config {
            catalog_file: "books.csv".to_string(),
            ..Config::default()
        };
        config.save().unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.catalog_file, "books.csv");
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let _guard = EnvGuard::new(ENV_VARS);
        assert!(Config::load_from_str("data_dir = [").is_err());
    }

    #[test]
    fn test_config_file_path_env_override() {
        let _guard = EnvGuard::new(ENV_VARS);

        env::set_var("SHELF_CONFIG", "/etc/shelf.toml");
        assert_eq!(Config::config_file_path(), PathBuf::from("/etc/shelf.toml"));
    }
}
