//! # Error Types
//!
//! Errors raised by a [`VerificationProvider`](crate::VerificationProvider).
//! A provider error is never a field-validation failure: field rules are
//! checked before a provider is called, and a mismatched code is a verdict,
//! not an error.

use thiserror::Error;

/// Failure talking to a verification provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider refused the request (missing fields, unknown number).
    #[error("verification request rejected: {message}")]
    Rejected {
        /// Message returned by the provider.
        message: String,
    },

    /// The provider throttled the caller.
    #[error("verification service rate limit exceeded: {message}")]
    RateLimited {
        /// Message returned by the provider.
        message: String,
    },

    /// The provider could not be reached or returned a server error.
    #[error("verification service unavailable: {reason}")]
    Unavailable {
        /// Transport or status description.
        reason: String,
    },

    /// The provider answered with a body that could not be understood.
    #[error("unexpected verification response: {reason}")]
    InvalidResponse {
        /// What was wrong with the body.
        reason: String,
    },
}
