use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionStatus {
    #[default]
    Active,
    Discharged,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdmissionRequest {
    pub first_name: String,
    pub last_name: String,
    #[validate(range(min = 1, max = 5))]
    pub triage_level: i32,
    pub triage_color: String,
    pub reason: Option<String>,
    pub ward: Option<String>,
    pub bed: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admission {
    /// `INT-NNNN`, allocated from the admissions counter.
    pub id: String,
    /// Local time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    pub first_name: String,
    pub last_name: String,
    pub triage_level: i32,
    pub triage_color: String,
    pub reason: Option<String>,
    pub ward: Option<String>,
    pub bed: Option<u32>,
    #[serde(default)]
    pub status: AdmissionStatus,
}
