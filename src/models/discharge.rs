use serde::{Deserialize, Serialize};

/// A discharge confirmed by a doctor, kept so later cases with the same
/// level and a similar reason can reuse its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DischargeRecord {
    pub triage_level: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub diagnosis_final: String,
    #[serde(default)]
    pub evolution_final: String,
    #[serde(default)]
    pub recommendations_final: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DischargeSuggestRequest {
    pub triage_level: i64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DischargeSuggestion {
    pub diagnosis: String,
    pub evolution: String,
    pub recommendations: String,
}

/// Input of the discharge sheet ("foaie de externare").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DischargeSheetRequest {
    pub patient_name: String,
    pub cnp: Option<String>,
    pub age: Option<i32>,
    pub sex: Option<String>,
    pub diagnosis: String,
    pub evolution: String,
    pub recommendations: String,
    pub triage_level: Option<i32>,
    pub triage_color: Option<String>,
    pub reason: Option<String>,
    #[serde(default)]
    pub investigations: Vec<String>,
    #[serde(default)]
    pub attached_pdfs: Vec<String>,
}

impl DischargeSheetRequest {
    /// Stored upload names to attach; `attached_pdfs` is the legacy field.
    pub fn attachments(&self) -> &[String] {
        if self.investigations.is_empty() {
            &self.attached_pdfs
        } else {
            &self.investigations
        }
    }
}
