use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::store::StoreError;

/// Opaque file storage keyed by filename.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, filename: &str, data: &[u8]) -> Result<(), StoreError>;
}

/// Writes blobs as plain files under one directory.
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn put(&self, filename: &str, data: &[u8]) -> Result<(), StoreError> {
        if filename.is_empty() || filename.contains(['/', '\\']) || filename == ".." {
            return Err(StoreError::Backend(format!("Invalid blob name {:?}", filename)));
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to create {}: {}", self.root.display(), e)))?;

        let path = self.root.join(filename);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to write {}: {}", path.display(), e)))?;

        debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}
