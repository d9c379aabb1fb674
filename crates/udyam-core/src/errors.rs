//! # Validation Errors
//!
//! Per-field messages recomputed on every submission attempt, plus an
//! optional banner for errors that belong to no single field (a failed
//! code request, an unreachable provider).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::validation::FieldViolation;

/// Messages currently shown by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    fields: BTreeMap<Field, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    general: Option<String>,
}

impl ValidationErrors {
    /// No messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error set from rule violations.
    pub fn from_violations(violations: impl IntoIterator<Item = FieldViolation>) -> Self {
        let mut errors = Self::new();
        for violation in violations {
            errors.set(violation.field, violation.message);
        }
        errors
    }

    /// An error set holding only a banner message.
    pub fn banner(message: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            general: Some(message.into()),
        }
    }

    /// Whether no field message and no banner is set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_none()
    }

    /// Message for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Set the message for `field`.
    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    /// Remove the message for `field`. Called when the user edits it.
    pub fn clear_field(&mut self, field: Field) {
        self.fields.remove(&field);
    }

    /// The banner message, if any.
    pub fn general(&self) -> Option<&str> {
        self.general.as_deref()
    }

    /// Show `message` in the banner.
    pub fn set_general(&mut self, message: impl Into<String>) {
        self.general = Some(message.into());
    }

    /// Hide the banner.
    pub fn dismiss_general(&mut self) {
        self.general = None;
    }

    /// Remove every message.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.general = None;
    }

    /// Field messages in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Number of field messages (the banner is not counted).
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
