//! Patients and admissions, kept together in `db.json`.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{info, instrument};

use super::json_store::{read_json, write_json};
use crate::error::StoreError;
use crate::models::{Admission, AdmissionRequest, AdmissionStatus, Patient};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastIds {
    pub patients: u64,
    pub admissions: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordsDb {
    pub patients: BTreeMap<String, Patient>,
    pub admissions: BTreeMap<String, Admission>,
    pub last_ids: LastIds,
}

impl RecordsDb {
    fn next_patient_id(&mut self) -> String {
        self.last_ids.patients += 1;
        self.last_ids.patients.to_string()
    }

    fn next_admission_id(&mut self) -> String {
        self.last_ids.admissions += 1;
        format!("INT-{:04}", self.last_ids.admissions)
    }
}

/// Numeric part of an `INT-NNNN` id; malformed ids sort last.
fn admission_seq(id: &str) -> u64 {
    id.strip_prefix("INT-")
        .and_then(|n| n.parse().ok())
        .unwrap_or(u64::MAX)
}

#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Write an empty database if none exists yet.
    pub async fn init(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                write_json(&self.path, &RecordsDb::default()).await?;
                info!(path = %self.path.display(), "created empty records database");
                Ok(())
            }
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Current database. A missing file reads as empty; reads never write.
    pub async fn load(&self) -> Result<RecordsDb, StoreError> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    async fn update<T>(&self, apply: impl FnOnce(&mut RecordsDb) -> T) -> Result<T, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut db = self.load().await?;
        let out = apply(&mut db);
        write_json(&self.path, &db).await?;
        Ok(out)
    }

    // ===== Patients =====

    /// Allocate the next patient id and store the patient built from it.
    #[instrument(skip(self, build))]
    pub async fn add_patient(
        &self,
        build: impl FnOnce(String) -> Patient,
    ) -> Result<Patient, StoreError> {
        let patient = self
            .update(|db| {
                let patient = build(db.next_patient_id());
                db.patients.insert(patient.id.clone(), patient.clone());
                patient
            })
            .await?;
        info!(patient_id = %patient.id, "patient registered");
        Ok(patient)
    }

    /// Patients in registration order.
    pub async fn list_patients(&self) -> Result<Vec<Patient>, StoreError> {
        let mut patients: Vec<Patient> = self.load().await?.patients.into_values().collect();
        patients.sort_by_key(|p| p.id.parse::<u64>().unwrap_or(u64::MAX));
        Ok(patients)
    }

    pub async fn get_patient(&self, id: &str) -> Result<Option<Patient>, StoreError> {
        Ok(self.load().await?.patients.remove(id))
    }

    // ===== Admissions =====

    #[instrument(skip(self, request), fields(triage_level = request.triage_level))]
    pub async fn add_admission(&self, request: AdmissionRequest) -> Result<Admission, StoreError> {
        let admission = self
            .update(|db| {
                let admission = Admission {
                    id: db.next_admission_id(),
                    timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                    first_name: request.first_name,
                    last_name: request.last_name,
                    triage_level: request.triage_level,
                    triage_color: request.triage_color,
                    reason: request.reason,
                    ward: request.ward,
                    bed: request.bed,
                    status: AdmissionStatus::Active,
                };
                db.admissions.insert(admission.id.clone(), admission.clone());
                admission
            })
            .await?;
        info!(admission_id = %admission.id, "admission created");
        Ok(admission)
    }

    /// Admissions in creation order.
    pub async fn list_admissions(&self) -> Result<Vec<Admission>, StoreError> {
        let mut admissions: Vec<Admission> = self.load().await?.admissions.into_values().collect();
        admissions.sort_by_key(|a| admission_seq(&a.id));
        Ok(admissions)
    }

    pub async fn get_admission(&self, id: &str) -> Result<Option<Admission>, StoreError> {
        Ok(self.load().await?.admissions.remove(id))
    }

    /// Mark an admission discharged. `None` if no such admission.
    #[instrument(skip(self))]
    pub async fn discharge_admission(&self, id: &str) -> Result<Option<Admission>, StoreError> {
        self.update(|db| {
            db.admissions.get_mut(id).map(|admission| {
                admission.status = AdmissionStatus::Discharged;
                admission.clone()
            })
        })
        .await
    }
}
