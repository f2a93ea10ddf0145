use crate::models::{WardSuggestion, WardSuggestionRequest};

/// Rule-based ward suggestion from triage level and colour.
pub fn suggest_ward(request: &WardSuggestionRequest) -> WardSuggestion {
    let color = request.triage_color.to_lowercase();
    let level = request.triage_level;

    let (ward, confidence) = if matches!(color.as_str(), "red" | "roșu") || level == 1 {
        ("Terapie Intensivă", 0.98)
    } else if matches!(color.as_str(), "orange" | "portocaliu") || level == 2 {
        ("Cardiologie / UPU Critici", 0.91)
    } else if matches!(color.as_str(), "yellow" | "galben") || level == 3 {
        ("Secția Medicină Internă", 0.87)
    } else if matches!(color.as_str(), "green" | "verde") || level == 4 {
        ("Ambulatoriu", 0.80)
    } else {
        ("Observație / Externare", 0.75)
    };

    WardSuggestion {
        suggested_ward: ward.to_string(),
        confidence,
        comment: format!(
            "Pacientul de nivel {level} ({}) este potrivit pentru {}.",
            color.to_uppercase(),
            ward.to_lowercase()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn request(level: i32, color: &str) -> WardSuggestionRequest {
        WardSuggestionRequest {
            triage_level: level,
            triage_color: color.to_string(),
            reason: None,
        }
    }

    #[test_case(1, "red", "Terapie Intensivă" ; "red level one")]
    #[test_case(5, "Roșu", "Terapie Intensivă" ; "romanian colour wins over level")]
    #[test_case(2, "", "Cardiologie / UPU Critici" ; "level two without colour")]
    #[test_case(9, "GALBEN", "Secția Medicină Internă" ; "upper case romanian yellow")]
    #[test_case(4, "green", "Ambulatoriu" ; "green")]
    #[test_case(5, "blue", "Observație / Externare" ; "fallback")]
    fn picks_ward(level: i32, color: &str, ward: &str) {
        assert_eq!(suggest_ward(&request(level, color)).suggested_ward, ward);
    }

    #[test]
    fn comment_mentions_level_and_colour() {
        let s = suggest_ward(&request(4, "green"));
        assert_eq!(s.confidence, 0.80);
        assert_eq!(s.comment, "Pacientul de nivel 4 (GREEN) este potrivit pentru ambulatoriu.");
    }
}
