use serde::{Deserialize, Serialize};

/// A doctor as stored in `doctors.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u32,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub stamp_url: String,
    #[serde(default)]
    pub signature_url: String,
    #[serde(default)]
    pub pin_hash: String,
}

/// The doctor view returned to clients; never carries the PIN hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorPublic {
    pub id: u32,
    pub full_name: String,
    pub specialty: String,
    pub stamp_url: String,
    pub signature_url: String,
}

impl From<&Doctor> for DoctorPublic {
    fn from(d: &Doctor) -> Self {
        Self {
            id: d.id,
            full_name: format!("{} {}", d.last_name, d.first_name).trim().to_string(),
            specialty: d.specialty.clone(),
            stamp_url: d.stamp_url.clone(),
            signature_url: d.signature_url.clone(),
        }
    }
}
