// src/validators/id_number.rs
use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use super::regions::province_name;
use crate::core::error::{Result, ToolError};

pub const ID_LENGTH: usize = 18;
pub const MIN_BIRTH_YEAR: i32 = 1900;
pub const MAX_PLAUSIBLE_AGE: i32 = 150;

const WEIGHTS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];
const CHECK_CHARS: [char; 11] = ['1', '0', 'X', '9', '8', '7', '6', '5', '4', '3', '2'];

/// A reason an ID number is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdIssue {
    Empty,
    WrongLength { actual: usize },
    BadFormat,
    UnknownRegion { code: String },
    BirthYearOutOfRange { year: i32 },
    BirthMonthInvalid { month: u32 },
    BirthDayInvalid { day: u32 },
    BirthDateNonexistent,
    BirthDateInFuture,
    ChecksumMismatch { expected: char, actual: char },
}

impl fmt::Display for IdIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdIssue::Empty => write!(f, "ID number is empty"),
            IdIssue::WrongLength { actual } => {
                write!(f, "ID number must be {} characters, got {}", ID_LENGTH, actual)
            }
            IdIssue::BadFormat => write!(
                f,
                "the first 17 characters must be digits and the last a digit or X"
            ),
            IdIssue::UnknownRegion { code } => write!(f, "unknown region code {}", code),
            IdIssue::BirthYearOutOfRange { year } => {
                write!(f, "birth year {} is out of range", year)
            }
            IdIssue::BirthMonthInvalid { month } => write!(f, "birth month {} is invalid", month),
            IdIssue::BirthDayInvalid { day } => write!(f, "birth day {} is invalid", day),
            IdIssue::BirthDateNonexistent => write!(f, "birth date does not exist"),
            IdIssue::BirthDateInFuture => write!(f, "birth date is in the future"),
            IdIssue::ChecksumMismatch { expected, actual } => write!(
                f,
                "check character mismatch: expected {}, found {}",
                expected, actual
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdWarning {
    ImplausibleAge { age: i32 },
}

impl fmt::Display for IdWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdWarning::ImplausibleAge { age } => {
                write!(f, "age {} is over {}, please double check", age, MAX_PLAUSIBLE_AGE)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<IdIssue>,
    pub warnings: Vec<IdWarning>,
}

impl ValidationReport {
    /// Warnings never affect validity.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn rejected(issue: IdIssue) -> Self {
        Self {
            errors: vec![issue],
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Fields decoded from an 18-character ID number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdInfo {
    pub province: String,
    pub province_code: String,
    pub city_code: String,
    pub county_code: String,
    pub birth_date: String,
    pub age: i32,
    pub gender: Gender,
    pub sequence_code: String,
    pub check_char: char,
    pub computed_check_char: char,
}

/// Expected check character for the first 17 digits.
pub fn compute_check_char(first17: &[u8]) -> char {
    let sum: u32 = first17
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(digit, weight)| (digit - b'0') as u32 * weight)
        .sum();
    CHECK_CHARS[(sum % 11) as usize]
}

fn age_on(today: NaiveDate, year: i32, month: u32, day: u32) -> i32 {
    let birthday_pending = (today.month(), today.day()) < (month, day);
    today.year() - year - i32::from(birthday_pending)
}

fn digits(raw: &str, range: std::ops::Range<usize>) -> u32 {
    raw[range]
        .bytes()
        .fold(0, |acc, b| acc * 10 + (b - b'0') as u32)
}

fn has_valid_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == ID_LENGTH
        && bytes[..17].iter().all(u8::is_ascii_digit)
        && (bytes[17].is_ascii_digit() || bytes[17] == b'X' || bytes[17] == b'x')
}

pub fn validate(raw: &str) -> ValidationReport {
    validate_on(raw, Local::now().date_naive())
}

/// Structural problems stop validation at the first failure; content
/// problems (region, birth date, checksum) are all collected.
pub fn validate_on(raw: &str, today: NaiveDate) -> ValidationReport {
    let id = raw.trim();

    if id.is_empty() {
        return ValidationReport::rejected(IdIssue::Empty);
    }
    let length = id.chars().count();
    if length != ID_LENGTH {
        return ValidationReport::rejected(IdIssue::WrongLength { actual: length });
    }
    if !has_valid_shape(id) {
        return ValidationReport::rejected(IdIssue::BadFormat);
    }

    let mut report = ValidationReport::default();

    let region = &id[0..2];
    if province_name(region).is_none() {
        report.errors.push(IdIssue::UnknownRegion {
            code: region.to_string(),
        });
    }

    let year = digits(id, 6..10) as i32;
    let month = digits(id, 10..12);
    let day = digits(id, 12..14);

    if year < MIN_BIRTH_YEAR || year > today.year() {
        report.errors.push(IdIssue::BirthYearOutOfRange { year });
    }
    if !(1..=12).contains(&month) {
        report.errors.push(IdIssue::BirthMonthInvalid { month });
    }
    if !(1..=31).contains(&day) {
        report.errors.push(IdIssue::BirthDayInvalid { day });
    }
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        report.errors.push(IdIssue::BirthDateNonexistent);
    }

    let age = age_on(today, year, month, day);
    if age > MAX_PLAUSIBLE_AGE {
        report.warnings.push(IdWarning::ImplausibleAge { age });
    }
    if age < 0 {
        report.errors.push(IdIssue::BirthDateInFuture);
    }

    let expected = compute_check_char(&id.as_bytes()[..17]);
    let actual = id.as_bytes()[17].to_ascii_uppercase() as char;
    if expected != actual {
        report
            .errors
            .push(IdIssue::ChecksumMismatch { expected, actual });
    }

    log::debug!(
        "validated ID number: {} errors, {} warnings",
        report.errors.len(),
        report.warnings.len()
    );
    report
}

pub fn decode(raw: &str) -> Option<IdInfo> {
    decode_on(raw, Local::now().date_naive())
}

/// Decodes the fields regardless of validity. Needs 18 characters whose
/// first 17 are digits, otherwise there is nothing meaningful to decode.
pub fn decode_on(raw: &str, today: NaiveDate) -> Option<IdInfo> {
    let id = raw.trim();
    if id.len() != ID_LENGTH || !id.as_bytes()[..17].iter().all(u8::is_ascii_digit) {
        return None;
    }

    let year = digits(id, 6..10) as i32;
    let month = digits(id, 10..12);
    let day = digits(id, 12..14);
    let gender_digit = id.as_bytes()[16] - b'0';

    Some(IdInfo {
        province: province_name(&id[0..2]).unwrap_or("Unknown").to_string(),
        province_code: id[0..2].to_string(),
        city_code: id[2..4].to_string(),
        county_code: id[4..6].to_string(),
        birth_date: format!("{:04}-{:02}-{:02}", year, month, day),
        age: age_on(today, year, month, day),
        gender: if gender_digit % 2 == 1 {
            Gender::Male
        } else {
            Gender::Female
        },
        sequence_code: id[14..17].to_string(),
        check_char: id[17..].chars().next()?,
        computed_check_char: compute_check_char(&id.as_bytes()[..17]),
    })
}

/// Validates and decodes in one step, failing with every collected issue.
pub fn validate_strict(raw: &str) -> Result<IdInfo> {
    let report = validate(raw);
    if !report.is_valid() {
        return Err(ToolError::ValidationFailed(report.errors));
    }
    decode(raw).ok_or(ToolError::ValidationFailed(vec![IdIssue::BadFormat]))
}
