//! Verification service client configuration.
//!
//! Defaults point at a locally running `udyam-api`. Override via
//! environment variables or explicit construction.

use url::Url;

/// Default service location.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the verification service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationApiConfig {
    /// Service root; routes are resolved under `/api`.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl VerificationApiConfig {
    /// Configuration for the service at `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("base_url", base_url)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `UDYAM_API_URL` (default: `http://127.0.0.1:5000`)
    /// - `UDYAM_API_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("UDYAM_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            base_url: parse_url("UDYAM_API_URL", &raw)?,
            timeout_secs: std::env::var("UDYAM_API_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Override the timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

fn parse_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("unsupported URL scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_timeout() {
        let cfg = VerificationApiConfig::new("http://localhost:5000").unwrap();
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cfg.base_url.as_str(), "http://localhost:5000/");
    }

    #[test]
    fn rejects_invalid_url() {
        assert!(matches!(
            VerificationApiConfig::new("not a url"),
            Err(ConfigError::InvalidUrl(..))
        ));
    }

    #[test]
    fn rejects_non_http_scheme() {
        assert!(matches!(
            VerificationApiConfig::new("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn from_env_reads_overrides() {
        std::env::set_var("UDYAM_API_URL", "https://verify.example.com");
        std::env::set_var("UDYAM_API_TIMEOUT_SECS", "3");
        let cfg = VerificationApiConfig::from_env();
        std::env::remove_var("UDYAM_API_URL");
        std::env::remove_var("UDYAM_API_TIMEOUT_SECS");

        let cfg = cfg.unwrap();
        assert_eq!(cfg.base_url.as_str(), "https://verify.example.com/");
        assert_eq!(cfg.timeout_secs, 3);
    }
}
