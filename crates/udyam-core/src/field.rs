//! # Form Fields
//!
//! The closed set of fields captured across both verification steps.
//! Wire names are camelCase (`identityNumber`) to match the request bodies
//! of the verification service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A field of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// 12-digit identity number (step 1).
    IdentityNumber,
    /// 10-digit mobile number starting 6-9 (step 1).
    MobileNumber,
    /// 6-digit one-time password (step 1, after the code is sent).
    Otp,
    /// 10-character tax identifier (step 2).
    TaxId,
    /// Name as printed on the tax identifier card (step 2).
    FullName,
    /// Date of birth, `YYYY-MM-DD` (step 2).
    DateOfBirth,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 6] = [
        Field::IdentityNumber,
        Field::MobileNumber,
        Field::Otp,
        Field::TaxId,
        Field::FullName,
        Field::DateOfBirth,
    ];

    /// Wire name used in JSON bodies and error maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdentityNumber => "identityNumber",
            Self::MobileNumber => "mobileNumber",
            Self::Otp => "otp",
            Self::TaxId => "taxId",
            Self::FullName => "fullName",
            Self::DateOfBirth => "dateOfBirth",
        }
    }

    /// Human-readable label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Self::IdentityNumber => "Identity Number",
            Self::MobileNumber => "Mobile Number",
            Self::Otp => "Enter OTP",
            Self::TaxId => "Tax ID",
            Self::FullName => "Name as per Tax ID",
            Self::DateOfBirth => "Date of Birth",
        }
    }

    /// Placeholder hint for an empty input.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::IdentityNumber => "Enter 12-digit identity number",
            Self::MobileNumber => "Enter 10-digit mobile number",
            Self::Otp => "Enter 6-digit OTP",
            Self::TaxId => "Enter tax ID (e.g., ABCDE1234F)",
            Self::FullName => "Enter name as per tax ID card",
            Self::DateOfBirth => "YYYY-MM-DD",
        }
    }

    /// Maximum number of characters the input accepts.
    pub fn max_len(&self) -> usize {
        match self {
            Self::IdentityNumber => 12,
            Self::MobileNumber => 10,
            Self::Otp => 6,
            Self::TaxId => 10,
            Self::FullName => 100,
            Self::DateOfBirth => 10,
        }
    }

    /// Whether non-digit characters are refused at input time.
    pub fn digits_only(&self) -> bool {
        matches!(self, Self::IdentityNumber | Self::MobileNumber)
    }

    /// Whether input is uppercased as it is typed.
    pub fn uppercased(&self) -> bool {
        matches!(self, Self::TaxId)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field name that does not match any [`Field`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts the wire name (`identityNumber`), kebab case (`identity-number`)
    /// and snake case (`identity_number`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Field::ALL
            .into_iter()
            .find(|field| field.as_str().to_lowercase() == normalized)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
