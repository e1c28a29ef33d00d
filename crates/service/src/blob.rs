//! External blob storage for uploaded student photos.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;

/// An uploaded photo as it leaves the HTTP layer.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Save/delete capability for uploaded file content, keyed by stored name.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `bytes`, returning the stored name to record on the entity.
    async fn save(&self, bytes: &[u8], original_name: &str) -> Result<String, ServiceError>;

    /// Remove a previously stored file. Missing files are not an error;
    /// the reference is already being dropped.
    async fn delete(&self, stored_name: &str) -> Result<(), ServiceError>;
}

/// Filesystem-backed store writing under a fixed root directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if it does not exist yet.
    pub async fn ensure(&self) -> Result<(), ServiceError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot create {}: {e}", self.root.display())))
    }

    fn stored_name(original_name: &str) -> String {
        // Keep only the file name component; uploads may carry paths.
        let base = Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");
        format!("{}-{}", Uuid::new_v4(), base)
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn save(&self, bytes: &[u8], original_name: &str) -> Result<String, ServiceError> {
        let stored = Self::stored_name(original_name);
        let path = self.root.join(&stored);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ServiceError::Storage(format!("write {}: {e}", path.display())))?;
        Ok(stored)
    }

    async fn delete(&self, stored_name: &str) -> Result<(), ServiceError> {
        let path = self.root.join(stored_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ServiceError::Storage(format!("delete {}: {e}", path.display()))),
        }
    }
}
