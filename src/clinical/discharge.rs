//! Discharge text recall.
//!
//! Reuses the most recent confirmed discharge with the same triage level and
//! an overlapping reason; otherwise falls back to a per-level template.

use crate::error::TriageError;
use crate::models::{DischargeRecord, DischargeSuggestion};

const DEFAULT_REASON: &str = "afecțiune acută, evaluată în regim de ambulator";

pub fn validate_level(level: i64) -> Result<(), TriageError> {
    if (1..=5).contains(&level) {
        Ok(())
    } else {
        Err(TriageError::InvalidTriageLevel(level))
    }
}

fn normalize(reason: Option<&str>) -> String {
    reason.unwrap_or_default().trim().to_lowercase()
}

/// `history` is in chronological order; the newest match wins.
pub fn recall_discharge(
    level: i64,
    reason: Option<&str>,
    history: &[DischargeRecord],
) -> Result<DischargeSuggestion, TriageError> {
    validate_level(level)?;

    let query = normalize(reason);
    if !query.is_empty() {
        let hit = history.iter().rev().find(|row| {
            if row.triage_level != level {
                return false;
            }
            let previous = normalize(row.reason.as_deref());
            !previous.is_empty() && (previous.contains(&query) || query.contains(&previous))
        });
        if let Some(row) = hit {
            return Ok(DischargeSuggestion {
                diagnosis: row.diagnosis_final.clone(),
                evolution: row.evolution_final.clone(),
                recommendations: row.recommendations_final.clone(),
            });
        }
    }

    Ok(default_template(level, reason))
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}

pub fn default_template(level: i64, reason: Option<&str>) -> DischargeSuggestion {
    let motive = reason.filter(|r| !r.is_empty()).unwrap_or(DEFAULT_REASON);

    let (diagnosis, evolution, recommendations) = match level {
        1 => (
            format!("Stare critică evaluată în UPU pentru {motive}."),
            "Pacient evaluat în urgență majoră. Stabilizare inițială efectuată, este necesară supraveghere de specialitate și eventual internare.",
            "Continuă prezentarea de urgență la cel mai apropiat spital și respectarea indicațiilor medicului curant.",
        ),
        2 => (
            format!("Episod acut cu potențial de agravare, cu adresare în UPU pentru {motive}."),
            "Simptomatologia s-a ameliorat parțial după tratamentul instituit în serviciul de urgență.",
            "Se recomandă monitorizarea atentă a simptomelor și prezentare la medicul specialist sau UPU dacă apar agravări.",
        ),
        3 => (
            format!("{} cu risc moderat, adecvat tratamentului în ambulator.", capitalize(motive)),
            "Evoluție favorabilă pe durata observației, fără criterii actuale de internare.",
            "Tratament simptomatic conform recomandărilor, control la medicul de familie / medicul specialist și reevaluare dacă simptomele persistă sau se agravează.",
        ),
        4 => (
            format!("{} cu severitate ușoară, stabilă clinic.", capitalize(motive)),
            "Stare generală bună, parametri vitali în limite acceptabile, fără modificări acute majore.",
            "Continuarea tratamentului la domiciliu, stil de viață adecvat și control periodic la medicul de familie.",
        ),
        _ => (
            format!("Consult de rutină / simptome minore: {motive}."),
            "Nu se evidențiază modificări acute semnificative la examenul obiectiv și investigațiile disponibile.",
            "Recomandări de stil de viață, eventual tratament simptomatic la nevoie și prezentare la medicul de familie pentru urmărire.",
        ),
    };

    DischargeSuggestion {
        diagnosis,
        evolution: evolution.to_string(),
        recommendations: recommendations.to_string(),
    }
}
