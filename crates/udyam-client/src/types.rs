//! Wire types of the verification service.
//!
//! Every response is an envelope `{ success, message, data? }`. Field names
//! are camelCase; the tax-identifier result keeps the service's
//! `panVerified` key.

use serde::{Deserialize, Serialize};

/// The common response envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

/// `data` of a successful `generate-otp` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpDispatchData {
    /// Masked destination, e.g. `987654****`.
    pub mobile_number: String,
}

/// `data` of a successful `verify-otp` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerificationData {
    pub identity_verified: bool,
    pub mobile_verified: bool,
}

/// `data` of a successful `verify-tax-id` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxVerificationData {
    pub pan_verified: bool,
    pub name_match: bool,
    pub dob_match: bool,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

/// Failure payload, used to extract a message from error responses.
#[derive(Debug, Deserialize)]
pub(crate) struct FailureBody {
    pub message: String,
}
