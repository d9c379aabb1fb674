//! # Flow Errors
//!
//! Raised when an action is not valid for the current step. Field
//! validation failures and provider failures are not errors here: they are
//! recorded in [`ValidationErrors`](udyam_core::ValidationErrors) and
//! reported through the submit outcome.

use thiserror::Error;

use udyam_core::Field;

use crate::step::Step;

/// An action that cannot be performed from the current state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// `advance()` called on the last step.
    #[error("no step after {step}")]
    NoNextStep {
        /// The current step.
        step: Step,
    },

    /// `retreat()` called on the first step.
    #[error("no step before {step}")]
    NoPreviousStep {
        /// The current step.
        step: Step,
    },

    /// The action does not exist on the current screen.
    #[error("{action} is not available on {step}")]
    ActionUnavailable {
        /// Name of the attempted action.
        action: &'static str,
        /// The current step.
        step: Step,
    },

    /// The field is not shown on the current screen.
    #[error("field {field} is not part of {step}")]
    FieldNotOnStep {
        /// The edited field.
        field: Field,
        /// The current step.
        step: Step,
    },

    /// Resend requested before the countdown reached zero.
    #[error("resend is locked for another {remaining}s")]
    ResendLocked {
        /// Seconds left on the countdown.
        remaining: u32,
    },
}
