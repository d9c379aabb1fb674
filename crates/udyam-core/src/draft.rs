//! # Registration Draft
//!
//! The in-memory record of every value entered across the flow. Created
//! empty, mutated only through [`RegistrationDraft::apply_input`], and
//! cleared on restart. Nothing here is persisted.
//!
//! Input-time filtering mirrors what the form inputs do before a value is
//! ever validated:
//!
//! - identity and mobile numbers refuse any edit containing a non-digit;
//! - the tax id is uppercased as it is typed;
//! - edits longer than the field's cap are discarded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::validation;

/// Why an edit was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRejection {
    /// A digit-only field received a non-digit character.
    NonDigit,
    /// The edit exceeds the field's maximum length.
    TooLong {
        /// The field's cap, in characters.
        max: usize,
    },
}

/// Result of applying an edit to the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The value was stored.
    Accepted,
    /// The edit was discarded; the previous value is kept.
    Rejected(InputRejection),
}

impl InputOutcome {
    /// Whether the edit was stored.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Values entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDraft {
    pub identity_number: String,
    pub mobile_number: String,
    pub otp: String,
    pub tax_id: String,
    pub full_name: String,
    pub date_of_birth: String,
}

impl RegistrationDraft {
    /// An empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::IdentityNumber => &self.identity_number,
            Field::MobileNumber => &self.mobile_number,
            Field::Otp => &self.otp,
            Field::TaxId => &self.tax_id,
            Field::FullName => &self.full_name,
            Field::DateOfBirth => &self.date_of_birth,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::IdentityNumber => &mut self.identity_number,
            Field::MobileNumber => &mut self.mobile_number,
            Field::Otp => &mut self.otp,
            Field::TaxId => &mut self.tax_id,
            Field::FullName => &mut self.full_name,
            Field::DateOfBirth => &mut self.date_of_birth,
        }
    }

    /// Replace the value of `field` with `raw`, applying the field's input
    /// filter. A rejected edit leaves the draft untouched.
    pub fn apply_input(&mut self, field: Field, raw: &str) -> InputOutcome {
        if field.digits_only() && !raw.chars().all(|c| c.is_ascii_digit()) {
            return InputOutcome::Rejected(InputRejection::NonDigit);
        }

        let value = if field.uppercased() {
            raw.to_uppercase()
        } else {
            raw.to_string()
        };

        let max = field.max_len();
        if value.chars().count() > max {
            return InputOutcome::Rejected(InputRejection::TooLong { max });
        }

        *self.slot_mut(field) = value;
        InputOutcome::Accepted
    }

    /// Empty every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether every field is empty.
    pub fn is_empty(&self) -> bool {
        Field::ALL.into_iter().all(|field| self.get(field).is_empty())
    }

    /// The date of birth as a calendar date, if it parses.
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        validation::check_date_of_birth(&self.date_of_birth).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_is_empty() {
        let draft = RegistrationDraft::new();
        assert!(draft.is_empty());
        assert_eq!(draft.get(Field::TaxId), "");
    }

    #[test]
    fn digit_fields_refuse_non_digits() {
        let mut draft = RegistrationDraft::new();
        assert!(draft.apply_input(Field::IdentityNumber, "1234").is_accepted());
        let outcome = draft.apply_input(Field::IdentityNumber, "1234a");
        assert_eq!(outcome, InputOutcome::Rejected(InputRejection::NonDigit));
        assert_eq!(draft.identity_number, "1234");

        let outcome = draft.apply_input(Field::MobileNumber, "98 76");
        assert_eq!(outcome, InputOutcome::Rejected(InputRejection::NonDigit));
        assert_eq!(draft.mobile_number, "");
    }

    #[test]
    fn otp_accepts_any_characters_within_cap() {
        let mut draft = RegistrationDraft::new();
        assert!(draft.apply_input(Field::Otp, "12a4").is_accepted());
        assert_eq!(draft.otp, "12a4");
    }

    #[test]
    fn tax_id_is_uppercased() {
        let mut draft = RegistrationDraft::new();
        assert!(draft.apply_input(Field::TaxId, "abcde1234f").is_accepted());
        assert_eq!(draft.tax_id, "ABCDE1234F");
        assert!(validation::check(Field::TaxId, &draft.tax_id).is_ok());
    }

    #[test]
    fn edits_over_cap_are_discarded() {
        let mut draft = RegistrationDraft::new();
        draft.apply_input(Field::MobileNumber, "9876543210");
        let outcome = draft.apply_input(Field::MobileNumber, "98765432101");
        assert_eq!(
            outcome,
            InputOutcome::Rejected(InputRejection::TooLong { max: 10 })
        );
        assert_eq!(draft.mobile_number, "9876543210");
    }

    #[test]
    fn empty_edit_clears_field() {
        let mut draft = RegistrationDraft::new();
        draft.apply_input(Field::FullName, "Asha");
        assert!(draft.apply_input(Field::FullName, "").is_accepted());
        assert_eq!(draft.full_name, "");
    }

    #[test]
    fn clear_empties_every_field() {
        let mut draft = RegistrationDraft::new();
        draft.apply_input(Field::IdentityNumber, "123456789012");
        draft.apply_input(Field::MobileNumber, "9876543210");
        draft.apply_input(Field::Otp, "123456");
        draft.apply_input(Field::TaxId, "ABCDE1234F");
        draft.apply_input(Field::FullName, "Asha Rao");
        draft.apply_input(Field::DateOfBirth, "1990-01-01");
        assert!(!draft.is_empty());

        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft, RegistrationDraft::default());
    }

    #[test]
    fn date_of_birth_parses_when_valid() {
        let mut draft = RegistrationDraft::new();
        assert_eq!(draft.date_of_birth(), None);
        draft.apply_input(Field::DateOfBirth, "1990-01-31");
        assert_eq!(
            draft.date_of_birth(),
            NaiveDate::from_ymd_opt(1990, 1, 31)
        );
    }

    #[test]
    fn serializes_with_wire_names() {
        let mut draft = RegistrationDraft::new();
        draft.apply_input(Field::IdentityNumber, "123456789012");
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["identityNumber"], "123456789012");
        assert_eq!(json["dateOfBirth"], "");
    }
}
