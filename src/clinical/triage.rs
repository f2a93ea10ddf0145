//! Five-level triage classification.
//!
//! Tiers are checked from most to least severe and the first match wins.
//! An absent measurement never satisfies a criterion.

use crate::clinical::cnp::parse_identifier_lenient;
use crate::models::{Normalized, TriageColor, TriageResult, VitalsSnapshot};

struct Tier {
    level: u8,
    color: TriageColor,
    label: &'static str,
    time_target: &'static str,
    reasons: &'static [&'static str],
    advice: &'static [&'static str],
}

const RESUSCITATION: Tier = Tier {
    level: 1,
    color: TriageColor::Red,
    label: "Roșu (Nivel I - Resuscitare)",
    time_target: "imediat",
    reasons: &["Condiție vitală critică"],
    advice: &["Anunță echipa de resuscitare", "Oxigen", "Acces venos", "Monitorizare"],
};

const CRITICAL: Tier = Tier {
    level: 2,
    color: TriageColor::Orange,
    label: "Portocaliu (Nivel II - Critic)",
    time_target: "≤10 minute",
    reasons: &["Risc vital moderat"],
    advice: &["Evaluare rapidă", "Analgezie", "Monitorizare", "Acces venos"],
};

const URGENT: Tier = Tier {
    level: 3,
    color: TriageColor::Yellow,
    label: "Galben (Nivel III - ≥2 resurse)",
    time_target: "≤30 minute",
    reasons: &[],
    advice: &[],
};

const STANDARD: Tier = Tier {
    level: 4,
    color: TriageColor::Green,
    label: "Verde (Nivel IV - 1 resursă)",
    time_target: "≤60 minute",
    reasons: &[],
    advice: &[],
};

const NON_URGENT: Tier = Tier {
    level: 5,
    color: TriageColor::Blue,
    label: "Albastru (Nivel V - fără resurse)",
    time_target: "≤120 minute",
    reasons: &[],
    advice: &[],
};

fn is_resuscitation(p: &VitalsSnapshot) -> bool {
    let flags = &p.red_flags;
    p.systolic_bp.map_or(false, |sbp| sbp < 80)
        || p.oxygen_saturation.map_or(false, |spo2| spo2 < 90.0)
        || p.respiratory_rate.map_or(false, |rr| rr < 8 || rr > 30)
        || p.glasgow_coma_scale.map_or(false, |gcs| gcs <= 8)
        || flags.active_bleeding
        || flags.severe_dyspnea
        || flags.anaphylaxis
        || flags.seizure_now
        || flags.major_trauma
}

fn is_critical(p: &VitalsSnapshot) -> bool {
    p.pain_score.map_or(false, |pain| pain >= 8)
        || p.glasgow_coma_scale.map_or(false, |gcs| (9..=12).contains(&gcs))
        || p.systolic_bp.map_or(false, |sbp| (80..90).contains(&sbp))
        || p.respiratory_rate.map_or(false, |rr| (24..=30).contains(&rr))
        || p.oxygen_saturation.map_or(false, |spo2| (90.0..=93.0).contains(&spo2))
        || p.temperature.map_or(false, |t| t >= 39.5)
        || p.red_flags.postictal_altered
}

fn select_tier(p: &VitalsSnapshot) -> &'static Tier {
    if is_resuscitation(p) {
        &RESUSCITATION
    } else if is_critical(p) {
        &CRITICAL
    } else {
        match p.resources() {
            0 => &NON_URGENT,
            1 => &STANDARD,
            _ => &URGENT,
        }
    }
}

/// Classify a snapshot as given. Total: every input yields a level.
pub fn classify(snapshot: &VitalsSnapshot) -> TriageResult {
    let tier = select_tier(snapshot);
    let to_owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    TriageResult {
        level: tier.level,
        color: tier.color,
        label: tier.label.to_string(),
        time_target: tier.time_target.to_string(),
        reasons: to_owned(tier.reasons),
        advice: to_owned(tier.advice),
        normalized: Normalized {
            age: snapshot.age,
            sex: snapshot.sex,
        },
    }
}

/// Fill the absent age and/or sex from the CNP, if one was supplied.
/// The identifier itself is not kept anywhere.
pub fn backfill_demographics(snapshot: &mut VitalsSnapshot) {
    if snapshot.age.is_some() && snapshot.sex.is_some() {
        return;
    }
    let Some(cnp) = snapshot.cnp.as_deref() else {
        return;
    };
    let info = parse_identifier_lenient(cnp);
    snapshot.age = snapshot.age.or(info.age);
    snapshot.sex = snapshot.sex.or(info.sex);
}

/// Entry point used by the API: backfill from the CNP, then classify.
pub fn triage(mut snapshot: VitalsSnapshot) -> TriageResult {
    backfill_demographics(&mut snapshot);
    classify(&snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RedFlags, Sex};
    use test_case::test_case;

    fn level_of(snapshot: VitalsSnapshot) -> u8 {
        classify(&snapshot).level
    }

    #[test]
    fn empty_snapshot_is_level_five() {
        let result = classify(&VitalsSnapshot::default());
        assert_eq!(result.level, 5);
        assert_eq!(result.color, TriageColor::Blue);
        assert_eq!(result.time_target, "≤120 minute");
        assert!(result.reasons.is_empty());
        assert!(result.advice.is_empty());
    }

    #[test]
    fn low_systolic_is_red_regardless_of_other_fields() {
        let result = classify(&VitalsSnapshot {
            systolic_bp: Some(70),
            oxygen_saturation: Some(95.0),
            ..Default::default()
        });
        assert_eq!(result.level, 1);
        assert_eq!(result.color, TriageColor::Red);
        assert_eq!(result.reasons, vec!["Condiție vitală critică".to_string()]);
        assert_eq!(result.advice.len(), 4);
        assert_eq!(result.time_target, "imediat");
    }

    #[test]
    fn severe_pain_alone_is_orange() {
        let result = classify(&VitalsSnapshot {
            pain_score: Some(9),
            ..Default::default()
        });
        assert_eq!(result.level, 2);
        assert_eq!(result.color, TriageColor::Orange);
        assert_eq!(result.reasons, vec!["Risc vital moderat".to_string()]);
    }

    #[test_case(2, 3, TriageColor::Yellow ; "two resources")]
    #[test_case(7, 3, TriageColor::Yellow ; "many resources")]
    #[test_case(1, 4, TriageColor::Green ; "one resource")]
    #[test_case(0, 5, TriageColor::Blue ; "no resources")]
    fn resource_count_decides_lower_tiers(resources: u32, level: u8, color: TriageColor) {
        let result = classify(&VitalsSnapshot {
            resources_expected: Some(resources),
            ..Default::default()
        });
        assert_eq!(result.level, level);
        assert_eq!(result.color, color);
    }

    #[test_case(Some(79), 1 ; "sbp 79 is red")]
    #[test_case(Some(80), 2 ; "sbp 80 is orange")]
    #[test_case(Some(89), 2 ; "sbp 89 is orange")]
    #[test_case(Some(90), 5 ; "sbp 90 falls through")]
    #[test_case(Some(0), 1 ; "sbp zero is a measurement")]
    #[test_case(None, 5 ; "sbp absent")]
    fn systolic_boundaries(sbp: Option<i32>, level: u8) {
        assert_eq!(level_of(VitalsSnapshot { systolic_bp: sbp, ..Default::default() }), level);
    }

    #[test_case(89.9, 1 ; "spo2 below 90 is red")]
    #[test_case(90.0, 2 ; "spo2 90 is orange")]
    #[test_case(93.0, 2 ; "spo2 93 is orange")]
    #[test_case(93.5, 5 ; "spo2 above 93 falls through")]
    fn saturation_boundaries(spo2: f64, level: u8) {
        assert_eq!(
            level_of(VitalsSnapshot { oxygen_saturation: Some(spo2), ..Default::default() }),
            level
        );
    }

    #[test_case(7, 1 ; "rr 7 is red")]
    #[test_case(8, 5 ; "rr 8 falls through")]
    #[test_case(23, 5 ; "rr 23 falls through")]
    #[test_case(24, 2 ; "rr 24 is orange")]
    #[test_case(30, 2 ; "rr 30 is orange")]
    #[test_case(31, 1 ; "rr 31 is red")]
    fn respiratory_boundaries(rr: i32, level: u8) {
        assert_eq!(
            level_of(VitalsSnapshot { respiratory_rate: Some(rr), ..Default::default() }),
            level
        );
    }

    #[test_case(3, 1 ; "gcs 3 is red")]
    #[test_case(8, 1 ; "gcs 8 is red")]
    #[test_case(9, 2 ; "gcs 9 is orange")]
    #[test_case(12, 2 ; "gcs 12 is orange")]
    #[test_case(13, 5 ; "gcs 13 falls through")]
    fn gcs_boundaries(gcs: i32, level: u8) {
        assert_eq!(
            level_of(VitalsSnapshot { glasgow_coma_scale: Some(gcs), ..Default::default() }),
            level
        );
    }

    #[test_case(7, 5 ; "pain 7 falls through")]
    #[test_case(8, 2 ; "pain 8 is orange")]
    fn pain_boundaries(pain: i32, level: u8) {
        assert_eq!(level_of(VitalsSnapshot { pain_score: Some(pain), ..Default::default() }), level);
    }

    #[test_case(39.4, 5 ; "temp 39.4 falls through")]
    #[test_case(39.5, 2 ; "temp 39.5 is orange")]
    fn temperature_boundaries(temp: f64, level: u8) {
        assert_eq!(level_of(VitalsSnapshot { temperature: Some(temp), ..Default::default() }), level);
    }

    #[test]
    fn critical_red_flags_are_level_one() {
        let flags = [
            RedFlags { active_bleeding: true, ..Default::default() },
            RedFlags { severe_dyspnea: true, ..Default::default() },
            RedFlags { anaphylaxis: true, ..Default::default() },
            RedFlags { seizure_now: true, ..Default::default() },
            RedFlags { major_trauma: true, ..Default::default() },
        ];
        for red_flags in flags {
            assert_eq!(level_of(VitalsSnapshot { red_flags, ..Default::default() }), 1);
        }
    }

    #[test]
    fn postictal_flag_is_level_two() {
        let red_flags = RedFlags { postictal_altered: true, ..Default::default() };
        assert_eq!(level_of(VitalsSnapshot { red_flags, ..Default::default() }), 2);
    }

    #[test]
    fn informational_flags_do_not_raise_level() {
        let red_flags = RedFlags {
            chest_pain: true,
            stroke_signs: true,
            pregnancy_3rd_trimester: true,
            ..Default::default()
        };
        assert_eq!(level_of(VitalsSnapshot { red_flags, ..Default::default() }), 5);
    }

    #[test]
    fn level_one_wins_over_level_two_and_resources() {
        let snapshot = VitalsSnapshot {
            glasgow_coma_scale: Some(7),
            pain_score: Some(10),
            temperature: Some(40.0),
            resources_expected: Some(3),
            ..Default::default()
        };
        assert_eq!(level_of(snapshot), 1);
    }

    #[test]
    fn classification_is_deterministic() {
        let snapshot = VitalsSnapshot {
            heart_rate: Some(130),
            respiratory_rate: Some(26),
            resources_expected: Some(2),
            ..Default::default()
        };
        assert_eq!(classify(&snapshot), classify(&snapshot));
    }

    #[test]
    fn backfill_uses_cnp_only_for_missing_fields() {
        let mut snapshot = VitalsSnapshot {
            cnp: Some("2850312123456".to_string()),
            age: Some(40),
            ..Default::default()
        };
        backfill_demographics(&mut snapshot);
        assert_eq!(snapshot.age, Some(40));
        assert_eq!(snapshot.sex, Some(Sex::Female));
    }

    #[test]
    fn invalid_cnp_leaves_demographics_empty() {
        let result = triage(VitalsSnapshot {
            cnp: Some("not-a-cnp".to_string()),
            ..Default::default()
        });
        assert_eq!(result.normalized, Normalized::default());
        assert_eq!(result.level, 5);
    }

    #[test]
    fn triage_reports_normalized_demographics() {
        let result = triage(VitalsSnapshot {
            cnp: Some("1850312123456".to_string()),
            ..Default::default()
        });
        assert_eq!(result.normalized.sex, Some(Sex::Male));
        assert!(result.normalized.age.unwrap() >= 39);
    }
}
