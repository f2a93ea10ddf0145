//! Uploaded investigation PDFs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUpload {
    pub original_name: String,
    pub stored_name: String,
}

#[derive(Debug)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Save a PDF under a fresh `inv_<uuid>.pdf` name.
    pub async fn save_pdf(&self, original_name: &str, bytes: &[u8]) -> Result<StoredUpload, StoreError> {
        let stored_name = format!("inv_{}.pdf", Uuid::new_v4().simple());
        let path = self.dir.join(&stored_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StoreError::Io { path, source })?;
        info!(%stored_name, size = bytes.len(), "investigation stored");
        Ok(StoredUpload {
            original_name: original_name.to_string(),
            stored_name,
        })
    }

    /// The subset of `names` that refer to stored files. Names containing
    /// path components are ignored.
    pub async fn existing(&self, names: &[String]) -> Vec<String> {
        let mut found = Vec::new();
        for name in names {
            let plain = Path::new(name)
                .file_name()
                .map_or(false, |f| f == name.as_str());
            if !plain {
                continue;
            }
            if tokio::fs::metadata(self.dir.join(name))
                .await
                .map_or(false, |m| m.is_file())
            {
                found.push(name.clone());
            }
        }
        found
    }
}
