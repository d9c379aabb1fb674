//! # Field Rules
//!
//! Each field has one rule: a pattern (or a length/date check) and the
//! message shown when the value fails it. Digit classes are spelled `[0-9]`
//! because `\d` in the `regex` crate also matches non-ASCII digits.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::field::Field;

static IDENTITY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{12}$").expect("identity number pattern compiles"));
static MOBILE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("mobile number pattern compiles"));
static OTP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("otp pattern compiles"));
static TAX_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("tax id pattern compiles"));

/// Format accepted for the date of birth.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minimum length of the trimmed full name.
pub const MIN_NAME_LEN: usize = 2;

/// A field value that failed its rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldViolation {
    /// The offending field.
    pub field: Field,
    /// Message shown next to the field.
    pub message: &'static str,
}

impl FieldViolation {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// The message a field shows when its pattern does not match.
pub fn rule_message(field: Field) -> &'static str {
    match field {
        Field::IdentityNumber => "Identity number must be exactly 12 digits",
        Field::MobileNumber => "Mobile number must start with 6-9 and be 10 digits",
        Field::Otp => "OTP must be exactly 6 digits",
        Field::TaxId => "Tax ID format: 5 letters, 4 digits, 1 letter (e.g., ABCDE1234F)",
        Field::FullName => "Name must be at least 2 characters long",
        Field::DateOfBirth => "Date of birth is required",
    }
}

/// Check `value` against the rule for `field`.
pub fn check(field: Field, value: &str) -> Result<(), FieldViolation> {
    let ok = match field {
        Field::IdentityNumber => IDENTITY_NUMBER.is_match(value),
        Field::MobileNumber => MOBILE_NUMBER.is_match(value),
        Field::Otp => OTP.is_match(value),
        Field::TaxId => TAX_ID.is_match(value),
        Field::FullName => value.trim().chars().count() >= MIN_NAME_LEN,
        Field::DateOfBirth => return check_date_of_birth(value).map(|_| ()),
    };
    if ok {
        Ok(())
    } else {
        Err(FieldViolation::new(field, rule_message(field)))
    }
}

/// Check every field in `fields`, returning the violations in order.
pub fn check_all<'a>(
    values: impl IntoIterator<Item = (Field, &'a str)>,
) -> Vec<FieldViolation> {
    values
        .into_iter()
        .filter_map(|(field, value)| check(field, value).err())
        .collect()
}

/// Parse the date of birth, distinguishing a missing value from a malformed one.
pub fn check_date_of_birth(value: &str) -> Result<NaiveDate, FieldViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::new(
            Field::DateOfBirth,
            rule_message(Field::DateOfBirth),
        ));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        FieldViolation::new(
            Field::DateOfBirth,
            "Date of birth must be a valid date (YYYY-MM-DD)",
        )
    })
}
