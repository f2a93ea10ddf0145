use std::path::PathBuf;

use super::json_store::read_json;
use crate::clinical::security::verify_pin;
use crate::error::StoreError;
use crate::models::Doctor;

/// Read-only roster of doctors (`doctors.json`).
#[derive(Debug)]
pub struct DoctorStore {
    path: PathBuf,
}

impl DoctorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All doctors; an absent roster is empty.
    pub async fn load(&self) -> Result<Vec<Doctor>, StoreError> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Option<Doctor>, StoreError> {
        Ok(self.load().await?.into_iter().find(|d| d.id == id))
    }

    /// The doctor whose stored hash matches `pin` under `salt`.
    pub async fn find_by_pin(&self, salt: &str, pin: &str) -> Result<Option<Doctor>, StoreError> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .find(|d| verify_pin(salt, pin, &d.pin_hash)))
    }
}
