//! Catalog file persistence
//!
//! Handles reading and writing the CSV catalog on disk.
//! Uses atomic writes (write to temp file, then rename) so the catalog is
//! never left half-written by a failed save.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use super::catalog;
use super::error::{StorageError, StorageResult};
use crate::models::BookRecord;

/// Reads and writes the full collection to a single CSV file
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the catalog file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Size of the catalog file in bytes, 0 if missing
    pub fn size(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    /// Load the catalog from disk
    ///
    /// Returns `None` if the file doesn't exist.
    /// Returns [`StorageError::InvalidFormat`] if it exists but can't be parsed.
    pub fn load(&self) -> StorageResult<Option<Vec<BookRecord>>> {
        if !self.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path).map_err(|e| StorageError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;

        catalog::decode(&bytes, &self.path).map(Some)
    }

    /// Rewrite the whole catalog
    pub fn save(&self, books: &[BookRecord]) -> StorageResult<()> {
        let bytes = catalog::encode(books)?;
        atomic_write(&self.path, &bytes)?;
        debug!("Saved {} record(s) to {:?}", books.len(), self.path);
        Ok(())
    }

    /// Copy an unreadable catalog aside so a later save can't destroy it
    ///
    /// The original file is left in place, unmodified. If an earlier backup
    /// already holds the same bytes, its path is returned and no copy is made.
    pub fn backup_corrupt(&self) -> StorageResult<PathBuf> {
        let bytes = fs::read(&self.path).map_err(|e| StorageError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;

        if let Some(existing) = self.find_backup(&bytes) {
            debug!("Catalog already backed up at {:?}", existing);
            return Ok(existing);
        }

        let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
        let backup_path = sibling_path(&self.path, &format!("{}{}", BACKUP_MARKER, stamp));

        atomic_write(&backup_path, &bytes)?;

        Ok(backup_path)
    }

    /// Earlier backup of this catalog whose content equals `bytes`
    fn find_backup(&self, bytes: &[u8]) -> Option<PathBuf> {
        let prefix = sibling_path(&self.path, BACKUP_MARKER);
        let prefix = prefix.file_name()?.to_string_lossy().into_owned();
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
            .ok()?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(&prefix))
            .map(|entry| entry.path())
            .collect();
        candidates.sort();

        candidates
            .into_iter()
            .rev()
            .find(|candidate| fs::read(candidate).map_or(false, |content| content == bytes))
    }
}

/// Infix between the catalog name and the timestamp of a backup copy
const BACKUP_MARKER: &str = ".corrupt-";

/// Append `suffix` to the file name of `path`
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = sibling_path(path, ".tmp");

    let result = write_and_sync(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source: e,
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_and_sync(path: &Path, data: &[u8]) -> StorageResult<()> {
    let mut file = File::create(path).map_err(|e| StorageError::from_io(e, path.to_path_buf()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, path.to_path_buf()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, path.to_path_buf()))?;
    Ok(())
}
