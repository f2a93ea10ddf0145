//! Flat-file persistence for the triage platform.
//!
//! Every collection is a JSON document on disk. Reads return an explicit
//! `Result<_, StoreError>`; callers decide whether a corrupt file is fatal.

use std::path::Path;
use tracing::info;

use crate::config::StorageConfig;
use crate::error::StoreError;

pub mod doctors;
pub mod history;
pub mod json_store;
pub mod records;
pub mod uploads;

pub use doctors::DoctorStore;
pub use history::DischargeHistory;
pub use records::{RecordStore, RecordsDb};
pub use uploads::{StoredUpload, UploadStore};

/// All record stores used by the application.
#[derive(Debug)]
pub struct Database {
    pub records: RecordStore,
    pub doctors: DoctorStore,
    pub history: DischargeHistory,
    pub uploads: UploadStore,
}

impl Database {
    /// Open the stores described by `storage`, creating the data and upload
    /// directories and an empty `db.json` if needed.
    pub async fn open(storage: &StorageConfig) -> Result<Self, StoreError> {
        ensure_dir(&storage.data_dir).await?;
        ensure_dir(&storage.uploads_dir).await?;
        info!(data_dir = %storage.data_dir.display(), "opening record stores");

        let records = RecordStore::new(storage.records_path());
        records.init().await?;

        Ok(Self {
            records,
            doctors: DoctorStore::new(storage.doctors_path()),
            history: DischargeHistory::new(storage.discharge_history_path()),
            uploads: UploadStore::new(&storage.uploads_dir),
        })
    }
}

async fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
}
