//! File storage backends.
//!
//! Provides the trait and local-filesystem implementation for storing
//! uploaded files.

use std::path::PathBuf;

use crate::filename::sanitize_filename;
use anyhow::{Context, Result};
use async_trait::async_trait;
use core_config::storage::StorageConfig;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// File storage backend trait.
///
/// Locations are storage-relative paths (e.g. `media/file/0195a2b3_photo.png`)
/// as recorded in image descriptors.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Write data to storage at the given location.
    async fn write(&self, location: &str, data: &[u8]) -> Result<()>;

    /// Read data from storage at the given location.
    async fn read(&self, location: &str) -> Result<Vec<u8>>;

    /// Delete a file from storage.
    ///
    /// Deleting a location that does not exist is not an error; it logs a
    /// warning and returns `Ok`.
    async fn delete(&self, location: &str) -> Result<()>;

    /// Check if a file exists.
    async fn exists(&self, location: &str) -> Result<bool>;

    /// Generate a fresh storage location for an upload, keyed by the logical
    /// form-field name the file arrived under.
    fn generate_location(&self, field: &str, filename: &str) -> String;

    /// Get the public URL for a stored file.
    fn public_url(&self, location: &str) -> String;
}

/// Local filesystem storage.
pub struct LocalFileStorage {
    /// Base path for file storage.
    base_path: PathBuf,
    /// Base URL for public file access.
    base_url: String,
}

impl LocalFileStorage {
    /// Create a new local file storage.
    pub fn new(base_path: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            base_url: base_url.into(),
        }
    }

    /// Create from storage configuration.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.upload_dir.clone(), config.base_url.clone())
    }

    /// Resolve a storage-relative location to an absolute path.
    ///
    /// Rejects absolute paths and paths containing `..` components to prevent
    /// directory traversal.
    fn resolve(&self, location: &str) -> Result<PathBuf> {
        let path = std::path::Path::new(location);
        if path.is_absolute() {
            anyhow::bail!("absolute paths not allowed in storage location");
        }
        for component in path.components() {
            if matches!(component, std::path::Component::ParentDir) {
                anyhow::bail!("directory traversal not allowed in storage location");
            }
        }
        Ok(self.base_path.join(path))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn write(&self, location: &str, data: &[u8]) -> Result<()> {
        let path = self.resolve(location)?;

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("failed to create directories")?;
        }

        // Write file
        let mut file = fs::File::create(&path)
            .await
            .context("failed to create file")?;

        file.write_all(data).await.context("failed to write file")?;

        file.flush().await.context("failed to flush file")?;

        debug!(location = %location, path = ?path, size = data.len(), "file written");
        Ok(())
    }

    async fn read(&self, location: &str) -> Result<Vec<u8>> {
        let path = self.resolve(location)?;
        let data = fs::read(&path).await.context("failed to read file")?;
        debug!(location = %location, size = data.len(), "file read");
        Ok(data)
    }

    async fn delete(&self, location: &str) -> Result<()> {
        let path = self.resolve(location)?;

        if path.exists() {
            fs::remove_file(&path)
                .await
                .context("failed to delete file")?;
            debug!(location = %location, "file deleted");
        } else {
            warn!(location = %location, "file not found for deletion");
        }

        Ok(())
    }

    async fn exists(&self, location: &str) -> Result<bool> {
        let path = self.resolve(location)?;
        Ok(path.exists())
    }

    fn generate_location(&self, field: &str, filename: &str) -> String {
        let unique_id = uuid::Uuid::now_v7().simple().to_string();
        let safe_field = sanitize_filename(field);
        let safe_filename = sanitize_filename(filename);

        format!(
            "media/{}/{}_{}",
            safe_field,
            &unique_id[..8],
            safe_filename
        )
    }

    fn public_url(&self, location: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), location)
    }
}

impl std::fmt::Debug for LocalFileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalFileStorage")
            .field("base_path", &self.base_path)
            .field("base_url", &self.base_url)
            .finish()
    }
}
