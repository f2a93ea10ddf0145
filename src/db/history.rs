//! Confirmed discharges (`discharge_learning.json`), oldest first.

use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use super::json_store::{read_json, write_json};
use crate::error::StoreError;
use crate::models::DischargeRecord;

#[derive(Debug)]
pub struct DischargeHistory {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl DischargeHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Every confirmed record. An absent file is an empty history; a corrupt
    /// one is an error the caller must decide about.
    pub async fn load(&self) -> Result<Vec<DischargeRecord>, StoreError> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    /// History for recall: unreadable history counts as empty.
    pub async fn load_or_empty(&self) -> Vec<DischargeRecord> {
        match self.load().await {
            Ok(history) => history,
            Err(e) => {
                warn!(error = %e, "discharge history unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Append a confirmed discharge. A corrupt history is replaced.
    #[instrument(skip(self, record), fields(triage_level = record.triage_level))]
    pub async fn append(&self, record: DischargeRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut history = self.load_or_empty().await;
        history.push(record);
        write_json(&self.path, &history).await?;
        info!(entries = history.len(), "discharge confirmed");
        Ok(())
    }
}
