use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::Path;

use crate::error::StoreError;

/// Read a JSON document. A missing file is `Ok(None)`.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `value` as pretty-printed JSON, creating parent directories.
/// The document is written beside the target and renamed over it, so
/// concurrent readers see either the old or the new file.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(StoreError::Encode)?;
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    tokio::fs::write(&staging, bytes).await.map_err(io_err)?;
    tokio::fs::rename(&staging, path).await.map_err(io_err)
}
