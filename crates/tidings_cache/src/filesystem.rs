//! Filesystem-backed record store.
//!
//! Each key maps to one JSON file directly under the base directory. Keys are
//! percent-encoded so arbitrary strings (`weather:germantown`,
//! `courses:list`) become safe, collision-free file names.

use crate::RecordStore;
use serde_json::Value as JsonValue;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tidings_error::{StorageError, StorageErrorKind, TidingsResult};

/// Record store writing one JSON document per key.
///
/// # Example Structure
///
/// ```text
/// /var/lib/tidings/cache/
/// ├── clock%3Aweather%3Agermantown.json
/// ├── record%3Aweather%3Agermantown.json
/// └── record%3Acourses%3Alist.json
/// ```
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written record.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a filesystem store rooted at `base_path`.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> TidingsResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Opened filesystem record store");
        Ok(Self { base_path })
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> TidingsResult<PathBuf> {
        if key.is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidKey(
                "empty key".to_string(),
            ))
            .into());
        }
        Ok(self.base_path.join(format!("{}.json", encode_key(key))))
    }
}

/// Percent-encode everything except ASCII alphanumerics, `-` and `_`.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            // Writing to a String cannot fail
            let _ = write!(encoded, "%{:02X}", byte);
        }
    }
    encoded
}

#[async_trait::async_trait]
impl RecordStore for FileStore {
    #[tracing::instrument(skip(self), fields(store = %self.base_path.display()))]
    async fn get(&self, key: &str) -> TidingsResult<Option<JsonValue>> {
        let path = self.path_for(key)?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::trace!(path = %path.display(), "No record on disk");
                return Ok(None);
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        Ok(Some(value))
    }

    #[tracing::instrument(skip(self, value), fields(store = %self.base_path.display()))]
    async fn put(&self, key: &str, value: &JsonValue) -> TidingsResult<()> {
        let path = self.path_for(key)?;

        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| StorageError::new(StorageErrorKind::Encode(e.to_string())))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Wrote record");
        Ok(())
    }
}
