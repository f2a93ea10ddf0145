use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardSuggestionRequest {
    pub triage_level: i32,
    pub triage_color: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardSuggestion {
    pub suggested_ward: String,
    pub confidence: f64,
    pub comment: String,
}
