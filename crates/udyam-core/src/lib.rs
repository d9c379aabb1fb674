//! # udyam-core -- Foundational Types for Udyam Verification
//!
//! Every other crate in the workspace depends on `udyam-core`; it depends on
//! nothing internal.
//!
//! ## Contents
//!
//! - [`field`]: the six form fields, their labels and input caps.
//! - [`validation`]: the regular-expression rules each field must satisfy.
//! - [`draft`]: [`RegistrationDraft`], the in-memory record of entered values,
//!   with input-time filtering (digits only, uppercasing, length caps).
//! - [`errors`]: [`ValidationErrors`], per-field messages plus the banner.
//! - [`format`]: display masks (grouped identity number, masked mobile).
//! - [`provider`]: the [`VerificationProvider`] capability and the demo
//!   implementation that accepts a fixed code.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `udyam-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests. Input never panics.

pub mod draft;
pub mod error;
pub mod errors;
pub mod field;
pub mod format;
pub mod provider;
pub mod validation;

pub use draft::{InputOutcome, InputRejection, RegistrationDraft};
pub use error::ProviderError;
pub use errors::ValidationErrors;
pub use field::{Field, UnknownField};
pub use provider::{
    CodeCheck, CodeDispatch, CodeRequest, CodeVerdict, DemoVerificationProvider,
    SecondaryIdRequest, SecondaryIdVerdict, VerificationProvider, DEMO_OTP,
};
pub use validation::FieldViolation;
