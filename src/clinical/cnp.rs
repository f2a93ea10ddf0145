//! National identifier (CNP) parsing.
//!
//! A CNP is 13 decimal digits: `S YY MM DD` followed by a six-digit
//! sequence. `S` encodes both the birth century and the sex.

use chrono::{Datelike, Local, NaiveDate};
use std::str::FromStr;

use crate::error::TriageError;
use crate::models::{Normalized, Sex};

pub const CNP_LENGTH: usize = 13;

/// A structurally valid CNP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationalId {
    pub birth_date: NaiveDate,
    pub sex: Sex,
    pub sequence: String,
}

impl FromStr for NationalId {
    type Err = TriageError;

    fn from_str(cnp: &str) -> Result<Self, Self::Err> {
        if cnp.len() != CNP_LENGTH || !cnp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TriageError::InvalidIdentifier(
                "expected exactly 13 digits".to_string(),
            ));
        }

        // All ASCII digits, so byte slicing is safe and every parse succeeds.
        let digit = |range: std::ops::Range<usize>| -> u32 {
            cnp[range].parse().unwrap_or_default()
        };
        let s = digit(0..1);
        let yy = digit(1..3) as i32;
        let mm = digit(3..5);
        let dd = digit(5..7);

        let year = century_base(s) + yy;
        let birth_date = NaiveDate::from_ymd_opt(year, mm, dd).ok_or_else(|| {
            TriageError::InvalidIdentifier(format!("no such date {year:04}-{mm:02}-{dd:02}"))
        })?;

        Ok(Self {
            birth_date,
            sex: sex_from_marker(s),
            sequence: cnp[7..].to_string(),
        })
    }
}

/// Century for the leading digit. Unknown markers fall back to the 1900s.
fn century_base(s: u32) -> i32 {
    match s {
        1 | 2 => 1900,
        3 | 4 => 1800,
        5 | 6 => 2000,
        _ => 1900,
    }
}

fn sex_from_marker(s: u32) -> Sex {
    if s % 2 == 1 {
        Sex::Male
    } else {
        Sex::Female
    }
}

/// Birth date and sex, or `InvalidIdentifier`.
pub fn parse_identifier_strict(cnp: &str) -> Result<(NaiveDate, Sex), TriageError> {
    let id: NationalId = cnp.parse()?;
    Ok((id.birth_date, id.sex))
}

/// Age and sex relative to today's local date; both `None` when the
/// identifier does not parse.
pub fn parse_identifier_lenient(cnp: &str) -> Normalized {
    parse_identifier_lenient_on(cnp, Local::now().date_naive())
}

pub fn parse_identifier_lenient_on(cnp: &str, today: NaiveDate) -> Normalized {
    match parse_identifier_strict(cnp) {
        Ok((birth_date, sex)) => Normalized {
            age: Some(age_on(birth_date, today)),
            sex: Some(sex),
        },
        Err(_) => Normalized::default(),
    }
}

/// Completed years between `birth_date` and `today`.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    years
}

pub fn calculate_age(birth_date: NaiveDate) -> i32 {
    age_on(birth_date, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_case("1850312123456", 1985, Sex::Male ; "marker 1 is male 1900s")]
    #[test_case("2850312123456", 1985, Sex::Female ; "marker 2 is female 1900s")]
    #[test_case("3850312123456", 1885, Sex::Male ; "marker 3 is male 1800s")]
    #[test_case("4850312123456", 1885, Sex::Female ; "marker 4 is female 1800s")]
    #[test_case("5050312123456", 2005, Sex::Male ; "marker 5 is male 2000s")]
    #[test_case("6050312123456", 2005, Sex::Female ; "marker 6 is female 2000s")]
    #[test_case("7850312123456", 1985, Sex::Male ; "marker 7 falls back to 1900s")]
    #[test_case("8850312123456", 1985, Sex::Female ; "marker 8 falls back to 1900s")]
    #[test_case("0850312123456", 1985, Sex::Female ; "marker 0 is even")]
    fn strict_decodes_century_and_sex(cnp: &str, year: i32, sex: Sex) {
        let (birth, parsed_sex) = parse_identifier_strict(cnp).unwrap();
        assert_eq!(birth, date(year, 3, 12));
        assert_eq!(parsed_sex, sex);
    }

    #[test_case("" ; "empty")]
    #[test_case("185031212345" ; "twelve digits")]
    #[test_case("18503121234567" ; "fourteen digits")]
    #[test_case("18503121234a6" ; "non digit")]
    #[test_case("1851312123456" ; "month thirteen")]
    #[test_case("1850001123456" ; "month zero")]
    #[test_case("1850230123456" ; "february thirtieth")]
    #[test_case("1850431123456" ; "april thirty first")]
    #[test_case("1010229123456" ; "february 29 in non leap year")]
    #[test_case("185031212345\u{0663}" ; "non ascii digit")]
    fn malformed_identifiers_fail_strict_and_lenient(cnp: &str) {
        assert!(matches!(
            parse_identifier_strict(cnp),
            Err(TriageError::InvalidIdentifier(_))
        ));
        assert_eq!(
            parse_identifier_lenient_on(cnp, date(2024, 1, 1)),
            Normalized { age: None, sex: None }
        );
    }

    #[test]
    fn leap_day_is_accepted_in_leap_year() {
        let (birth, _) = parse_identifier_strict("5040229123456").unwrap();
        assert_eq!(birth, date(2004, 2, 29));
    }

    #[test]
    fn age_is_decremented_before_birthday() {
        let birth = date(1985, 3, 12);
        assert_eq!(age_on(birth, date(2024, 3, 11)), 38);
        assert_eq!(age_on(birth, date(2024, 3, 12)), 39);
        assert_eq!(age_on(birth, date(2024, 12, 31)), 39);
    }

    #[test]
    fn lenient_reports_age_and_sex() {
        let n = parse_identifier_lenient_on("2850312123456", date(2024, 6, 1));
        assert_eq!(n.age, Some(39));
        assert_eq!(n.sex, Some(Sex::Female));
    }

    #[test]
    fn national_id_keeps_sequence() {
        let id: NationalId = "1850312123456".parse().unwrap();
        assert_eq!(id.sequence, "123456");
    }
}
