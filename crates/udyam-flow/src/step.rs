//! # Steps
//!
//! The three screens of the flow, in order:
//!
//! ```text
//! IdentityVerification (1) ──▶ TaxVerification (2) ──▶ Success (3)
//!          ▲                          │
//!          └──────── back ────────────┘
//! ```
//!
//! The step is a tagged variant, so a step numbered 0 or 4 cannot exist.
//! [`Step::next`] and [`Step::previous`] return `None` at the ends.

use serde::{Deserialize, Serialize};

use udyam_core::Field;

/// A screen of the verification flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Step {
    /// Identity number + mobile number, confirmed with a one-time password.
    IdentityVerification = 1,
    /// Tax identifier, name and date of birth.
    TaxVerification = 2,
    /// Completion summary.
    Success = 3,
}

impl Step {
    /// Number of steps.
    pub const COUNT: u8 = 3;

    /// The first step.
    pub const FIRST: Step = Step::IdentityVerification;

    /// The step number (1-3).
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// The following step, if any.
    pub fn next(&self) -> Option<Step> {
        match self {
            Self::IdentityVerification => Some(Self::TaxVerification),
            Self::TaxVerification => Some(Self::Success),
            Self::Success => None,
        }
    }

    /// The preceding step, if any.
    pub fn previous(&self) -> Option<Step> {
        match self {
            Self::IdentityVerification => None,
            Self::TaxVerification => Some(Self::IdentityVerification),
            Self::Success => Some(Self::TaxVerification),
        }
    }

    /// The step with the given number.
    pub fn from_number(number: u8) -> Option<Step> {
        match number {
            1 => Some(Self::IdentityVerification),
            2 => Some(Self::TaxVerification),
            3 => Some(Self::Success),
            _ => None,
        }
    }

    /// Title shown in the progress indicator and step heading.
    pub fn title(&self) -> &'static str {
        match self {
            Self::IdentityVerification => "Identity Verification",
            Self::TaxVerification => "Tax ID Verification",
            Self::Success => "Verification Complete!",
        }
    }

    /// One-line description under the title.
    pub fn description(&self) -> &'static str {
        match self {
            Self::IdentityVerification => "Verify your identity",
            Self::TaxVerification => "Validate your tax ID details",
            Self::Success => "Your identity and tax ID have been verified",
        }
    }

    /// Fields entered on this step.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::IdentityVerification => &[Field::IdentityNumber, Field::MobileNumber, Field::Otp],
            Self::TaxVerification => &[Field::TaxId, Field::FullName, Field::DateOfBirth],
            Self::Success => &[],
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::IdentityVerification => "IDENTITY_VERIFICATION",
            Self::TaxVerification => "TAX_VERIFICATION",
            Self::Success => "SUCCESS",
        };
        f.write_str(s)
    }
}
