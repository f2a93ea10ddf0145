//! Data models shared by the triage core, the record stores and the API.

pub mod admission;
pub mod discharge;
pub mod doctor;
pub mod patient;
pub mod triage;
pub mod ward;

pub use admission::{Admission, AdmissionRequest, AdmissionStatus};
pub use discharge::{DischargeRecord, DischargeSheetRequest, DischargeSuggestRequest, DischargeSuggestion};
pub use doctor::{Doctor, DoctorPublic};
pub use patient::{Patient, PatientCreate};
pub use triage::{Normalized, RedFlags, Sex, TriageColor, TriageResult, VitalsSnapshot};
pub use ward::{WardSuggestion, WardSuggestionRequest};
