//! Verification client error types.

use udyam_core::ProviderError;

/// Errors from verification service calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service answered with a non-2xx status.
    #[error("{endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        /// The failure payload's `message`, or the raw body.
        message: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl From<ClientError> for ProviderError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api {
                status: 429,
                message,
                ..
            } => ProviderError::RateLimited { message },
            ClientError::Api {
                status: 400..=499,
                message,
                ..
            } => ProviderError::Rejected { message },
            ClientError::Api { .. } | ClientError::Http { .. } | ClientError::Config(_) => {
                ProviderError::Unavailable {
                    reason: err.to_string(),
                }
            }
            ClientError::Deserialization { .. } => ProviderError::InvalidResponse {
                reason: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, message: &str) -> ClientError {
        ClientError::Api {
            endpoint: "POST /api/generate-otp".into(),
            status,
            message: message.into(),
        }
    }

    #[test]
    fn client_errors_keep_the_service_message() {
        assert_eq!(
            ProviderError::from(api(400, "Identity number and mobile number are required")),
            ProviderError::Rejected {
                message: "Identity number and mobile number are required".into()
            }
        );
    }

    #[test]
    fn too_many_requests_is_rate_limited() {
        assert!(matches!(
            ProviderError::from(api(429, "slow down")),
            ProviderError::RateLimited { .. }
        ));
    }

    #[test]
    fn server_errors_are_unavailable() {
        match ProviderError::from(api(500, "Something went wrong!")) {
            ProviderError::Unavailable { reason } => assert!(reason.contains("500")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
