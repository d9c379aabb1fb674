//! # Flow Context
//!
//! The draft and the error set shared by every step. Owned by the
//! controller and lent to the active step for the duration of one action.

use serde::Serialize;

use udyam_core::{Field, InputOutcome, RegistrationDraft, ValidationErrors};

/// Values entered so far and the messages currently shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlowContext {
    pub draft: RegistrationDraft,
    pub errors: ValidationErrors,
}

impl FlowContext {
    /// Empty draft, no messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an edit. An accepted edit clears that field's message.
    pub fn input(&mut self, field: Field, raw: &str) -> InputOutcome {
        let outcome = self.draft.apply_input(field, raw);
        if outcome.is_accepted() {
            self.errors.clear_field(field);
        }
        outcome
    }

    /// Clear the draft and every message.
    pub fn reset(&mut self) {
        self.draft.clear();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_edit_clears_field_error() {
        let mut ctx = FlowContext::new();
        ctx.errors.set(Field::MobileNumber, "bad");
        ctx.errors.set(Field::IdentityNumber, "bad");
        assert!(ctx.input(Field::MobileNumber, "98").is_accepted());
        assert!(ctx.errors.get(Field::MobileNumber).is_none());
        assert_eq!(ctx.errors.get(Field::IdentityNumber), Some("bad"));
    }

    #[test]
    fn rejected_edit_keeps_field_error() {
        let mut ctx = FlowContext::new();
        ctx.errors.set(Field::MobileNumber, "bad");
        assert!(!ctx.input(Field::MobileNumber, "98x").is_accepted());
        assert_eq!(ctx.errors.get(Field::MobileNumber), Some("bad"));
    }

    #[test]
    fn reset_clears_everything() {
        let mut ctx = FlowContext::new();
        ctx.input(Field::FullName, "Asha");
        ctx.errors.set_general("oops");
        ctx.reset();
        assert!(ctx.draft.is_empty());
        assert!(ctx.errors.is_empty());
    }
}
