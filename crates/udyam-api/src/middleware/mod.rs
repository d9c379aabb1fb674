//! Tower middleware for the verification API.

pub mod rate_limit;
pub mod security_headers;
pub mod tracing_layer;
