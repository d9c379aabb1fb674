//! # udyam-client -- Typed Rust client for the verification service
//!
//! [`HttpVerificationProvider`] calls `udyam-api` over HTTP and implements
//! [`VerificationProvider`](udyam_core::VerificationProvider), so the form
//! flow can run against a live service instead of the in-process demo
//! provider.

pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use config::{ConfigError, VerificationApiConfig};
pub use error::ClientError;
pub use provider::HttpVerificationProvider;
