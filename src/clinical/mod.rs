//! Pure clinical logic: identifier parsing, triage rules, discharge recall,
//! ward suggestion, PIN hashing and discharge sheet layout.

pub mod cnp;
pub mod discharge;
pub mod security;
pub mod sheet;
pub mod triage;
pub mod wardmap;
