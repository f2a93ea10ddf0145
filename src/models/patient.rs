use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::triage::Sex;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PatientCreate {
    #[validate(length(equal = 13))]
    pub cnp: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// A registered patient. Birth date, age and sex are derived from the CNP
/// when the record is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub cnp: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub age: i32,
    pub sex: Sex,
    pub phone: Option<String>,
    pub address: Option<String>,
}
