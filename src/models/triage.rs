use serde::{Deserialize, Serialize};

/// Administrative sex as encoded in the national identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// Boolean indicators of acute life-threatening risk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedFlags {
    pub active_bleeding: bool,
    pub chest_pain: bool,
    pub severe_dyspnea: bool,
    pub anaphylaxis: bool,
    pub seizure_now: bool,
    pub postictal_altered: bool,
    pub stroke_signs: bool,
    pub pregnancy_3rd_trimester: bool,
    pub major_trauma: bool,
}

/// A single triage intake. Every measurement is optional: `None` means
/// "not measured", never zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub cnp: Option<String>,
    pub age: Option<i32>,
    pub sex: Option<Sex>,
    #[serde(rename = "sbp")]
    pub systolic_bp: Option<i32>,
    #[serde(rename = "dbp")]
    pub diastolic_bp: Option<i32>,
    #[serde(rename = "hr")]
    pub heart_rate: Option<i32>,
    #[serde(rename = "rr")]
    pub respiratory_rate: Option<i32>,
    #[serde(rename = "spo2")]
    pub oxygen_saturation: Option<f64>,
    #[serde(rename = "temp")]
    pub temperature: Option<f64>,
    #[serde(rename = "gcs")]
    pub glasgow_coma_scale: Option<i32>,
    #[serde(rename = "pain")]
    pub pain_score: Option<i32>,
    #[serde(default)]
    pub red_flags: RedFlags,
    pub resources_expected: Option<u32>,
}

impl VitalsSnapshot {
    pub fn resources(&self) -> u32 {
        self.resources_expected.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
}

impl TriageColor {
    pub fn as_str(self) -> &'static str {
        match self {
            TriageColor::Red => "red",
            TriageColor::Orange => "orange",
            TriageColor::Yellow => "yellow",
            TriageColor::Green => "green",
            TriageColor::Blue => "blue",
        }
    }
}

/// Age and sex actually used for the classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalized {
    pub age: Option<i32>,
    pub sex: Option<Sex>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResult {
    pub level: u8,
    pub color: TriageColor,
    pub label: String,
    pub time_target: String,
    pub reasons: Vec<String>,
    pub advice: Vec<String>,
    pub normalized: Normalized,
}
