//! # API Route Modules
//!
//! - `health` -- liveness payload with a server timestamp.
//! - `otp` -- one-time code dispatch and check for the identity step.
//! - `tax_id` -- tax identifier verification for the second step.
//!
//! Every handler answers `{ success, message, data? }` and persists nothing.

pub mod health;
pub mod otp;
pub mod tax_id;

use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope shared by the verification endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessBody<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> SuccessBody<T> {
    pub fn new(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
        }
    }
}
