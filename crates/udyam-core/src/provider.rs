//! # Verification Provider
//!
//! The capability the form flow and the request handlers use to send and
//! check one-time passwords and to verify the secondary tax identifier.
//!
//! ## Architecture
//!
//! [`VerificationProvider`] abstracts over the verification backend. The
//! [`DemoVerificationProvider`] implements the demo behaviour in process:
//! any code request succeeds, only [`DEMO_OTP`] verifies, and secondary
//! verification always approves after a short simulated delay. An HTTP
//! implementation against the verification service lives in `udyam-client`.
//! Swapping providers never touches flow logic.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::format::mask_mobile;

/// The code accepted by [`DemoVerificationProvider::new`].
pub const DEMO_OTP: &str = "123456";

/// Simulated latency of secondary verification in the demo provider.
pub const DEMO_SECONDARY_LATENCY: Duration = Duration::from_secs(1);

/// Request to send a one-time password to a mobile number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRequest {
    pub identity_number: String,
    pub mobile_number: String,
}

/// Confirmation that a code was dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDispatch {
    /// Destination number with the last four digits hidden.
    pub masked_mobile: String,
}

/// A code entered by the user, with the identity it was sent for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeCheck {
    pub identity_number: String,
    pub mobile_number: String,
    pub otp: String,
}

/// Outcome of checking a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeVerdict {
    /// The code matches; identity and mobile are confirmed.
    Verified,
    /// The code does not match.
    Rejected {
        /// Message to show next to the code input.
        message: String,
    },
}

/// Request to verify the secondary tax identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryIdRequest {
    pub identity_number: String,
    pub tax_id: String,
    pub full_name: String,
    pub date_of_birth: String,
}

/// Per-attribute result of secondary verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryIdVerdict {
    pub tax_id_verified: bool,
    pub name_match: bool,
    pub dob_match: bool,
}

impl SecondaryIdVerdict {
    /// A verdict with every attribute matched.
    pub fn approved() -> Self {
        Self {
            tax_id_verified: true,
            name_match: true,
            dob_match: true,
        }
    }

    /// Whether every attribute matched.
    pub fn is_verified(&self) -> bool {
        self.tax_id_verified && self.name_match && self.dob_match
    }
}

/// Backend that sends and checks codes and verifies the tax identifier.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// tasks behind an `Arc`. The trait is object-safe so the provider can be
/// chosen at runtime (demo vs. HTTP).
#[async_trait]
pub trait VerificationProvider: Send + Sync {
    /// Send a one-time password to `request.mobile_number`.
    async fn request_code(&self, request: &CodeRequest) -> Result<CodeDispatch, ProviderError>;

    /// Check a one-time password.
    async fn verify_code(&self, check: &CodeCheck) -> Result<CodeVerdict, ProviderError>;

    /// Verify the tax identifier against name and date of birth.
    async fn verify_secondary_id(
        &self,
        request: &SecondaryIdRequest,
    ) -> Result<SecondaryIdVerdict, ProviderError>;

    /// Human-readable name of the implementation, for logs.
    fn provider_name(&self) -> &str;
}

/// In-process provider with the demo behaviour.
#[derive(Debug, Clone)]
pub struct DemoVerificationProvider {
    code: String,
    secondary_latency: Duration,
}

impl DemoVerificationProvider {
    /// Demo provider accepting [`DEMO_OTP`] with a one-second secondary delay.
    pub fn new() -> Self {
        Self {
            code: DEMO_OTP.to_string(),
            secondary_latency: DEMO_SECONDARY_LATENCY,
        }
    }

    /// Accept `code` instead of [`DEMO_OTP`].
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Override the simulated secondary-verification delay.
    pub fn with_secondary_latency(mut self, latency: Duration) -> Self {
        self.secondary_latency = latency;
        self
    }

    /// The accepted code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Message returned for a mismatched code.
    pub fn mismatch_message(&self) -> String {
        format!("Invalid OTP. Use {} for demo.", self.code)
    }
}

impl Default for DemoVerificationProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationProvider for DemoVerificationProvider {
    async fn request_code(&self, request: &CodeRequest) -> Result<CodeDispatch, ProviderError> {
        tracing::debug!(provider = self.provider_name(), "simulating code dispatch");
        Ok(CodeDispatch {
            masked_mobile: mask_mobile(&request.mobile_number),
        })
    }

    async fn verify_code(&self, check: &CodeCheck) -> Result<CodeVerdict, ProviderError> {
        if check.otp == self.code {
            Ok(CodeVerdict::Verified)
        } else {
            Ok(CodeVerdict::Rejected {
                message: self.mismatch_message(),
            })
        }
    }

    async fn verify_secondary_id(
        &self,
        _request: &SecondaryIdRequest,
    ) -> Result<SecondaryIdVerdict, ProviderError> {
        if !self.secondary_latency.is_zero() {
            tokio::time::sleep(self.secondary_latency).await;
        }
        Ok(SecondaryIdVerdict::approved())
    }

    fn provider_name(&self) -> &str {
        "DemoVerificationProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(otp: &str) -> CodeCheck {
        CodeCheck {
            identity_number: "123456789012".into(),
            mobile_number: "9876543210".into(),
            otp: otp.into(),
        }
    }

    #[tokio::test]
    async fn demo_dispatch_masks_mobile() {
        let provider = DemoVerificationProvider::new();
        let dispatch = provider
            .request_code(&CodeRequest {
                identity_number: "123456789012".into(),
                mobile_number: "9876543210".into(),
            })
            .await
            .unwrap();
        assert_eq!(dispatch.masked_mobile, "987654****");
    }

    #[tokio::test]
    async fn demo_accepts_only_fixed_code() {
        let provider = DemoVerificationProvider::new();
        assert_eq!(
            provider.verify_code(&check("123456")).await.unwrap(),
            CodeVerdict::Verified
        );
        match provider.verify_code(&check("000000")).await.unwrap() {
            CodeVerdict::Rejected { message } => {
                assert_eq!(message, "Invalid OTP. Use 123456 for demo.");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn custom_code_replaces_default() {
        let provider = DemoVerificationProvider::new().with_code("654321");
        assert_eq!(
            provider.verify_code(&check("654321")).await.unwrap(),
            CodeVerdict::Verified
        );
        assert!(matches!(
            provider.verify_code(&check("123456")).await.unwrap(),
            CodeVerdict::Rejected { .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn secondary_verification_waits_then_approves() {
        let provider = DemoVerificationProvider::new();
        let request = SecondaryIdRequest {
            identity_number: "123456789012".into(),
            tax_id: "ABCDE1234F".into(),
            full_name: "Asha Rao".into(),
            date_of_birth: "1990-01-01".into(),
        };
        let started = tokio::time::Instant::now();
        let verdict = provider.verify_secondary_id(&request).await.unwrap();
        assert!(verdict.is_verified());
        assert!(started.elapsed() >= DEMO_SECONDARY_LATENCY);
    }

    #[test]
    fn verdict_requires_every_attribute() {
        let mut verdict = SecondaryIdVerdict::approved();
        assert!(verdict.is_verified());
        verdict.name_match = false;
        assert!(!verdict.is_verified());
    }

    #[test]
    fn provider_is_object_safe() {
        let provider: std::sync::Arc<dyn VerificationProvider> =
            std::sync::Arc::new(DemoVerificationProvider::new());
        assert_eq!(provider.provider_name(), "DemoVerificationProvider");
    }
}
