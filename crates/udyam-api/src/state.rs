//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Handlers persist nothing: the state holds the
//! configuration and the verification provider only.

use std::sync::Arc;
use std::time::Duration;

use udyam_core::{DemoVerificationProvider, VerificationProvider};

use crate::middleware::rate_limit::RateLimitConfig;

/// Origin allowed by default outside production.
pub const DEV_ORIGIN: &str = "http://localhost:3000";

/// Deployment environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    pub environment: Environment,
    /// Origins allowed to call the API with credentials.
    pub cors_allowed_origins: Vec<String>,
    pub rate_limit: RateLimitConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            environment: Environment::Development,
            cors_allowed_origins: vec![DEV_ORIGIN.to_string()],
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 5000)
    /// - `APP_ENV` (`development` | `production`, default: development)
    /// - `CORS_ALLOWED_ORIGINS` (comma-separated; default: `http://localhost:3000`
    ///   in development, none in production)
    /// - `RATE_LIMIT_MAX` (default: 100)
    /// - `RATE_LIMIT_WINDOW_SECS` (default: 900)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let environment = match lookup("APP_ENV") {
            Some(raw) => raw.parse()?,
            None => Environment::Development,
        };
        let cors_allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None if environment == Environment::Production => Vec::new(),
            None => defaults.cors_allowed_origins,
        };
        Ok(Self {
            port: parse_var(&lookup, "PORT", defaults.port)?,
            environment,
            cors_allowed_origins,
            rate_limit: RateLimitConfig {
                max_requests: parse_var(&lookup, "RATE_LIMIT_MAX", defaults.rate_limit.max_requests)?,
                window_secs: parse_var(
                    &lookup,
                    "RATE_LIMIT_WINDOW_SECS",
                    defaults.rate_limit.window_secs,
                )?,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            var: name.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: String, value: String },
    #[error("APP_ENV must be development or production, got {0:?}")]
    InvalidEnvironment(String),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub provider: Arc<dyn VerificationProvider>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

impl AppState {
    /// Default configuration with the demo provider.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// The demo provider, answering without simulated latency.
    pub fn with_config(config: AppConfig) -> Self {
        let provider = DemoVerificationProvider::new().with_secondary_latency(Duration::ZERO);
        Self::with_provider(config, Arc::new(provider))
    }

    pub fn with_provider(config: AppConfig, provider: Arc<dyn VerificationProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.rate_limit.max_requests, 100);
        assert_eq!(cfg.rate_limit.window_secs, 900);
        assert_eq!(cfg.cors_allowed_origins, vec![DEV_ORIGIN]);
    }

    #[test]
    fn production_has_no_default_origin() {
        let cfg = AppConfig::from_lookup(lookup(&[("APP_ENV", "production")])).unwrap();
        assert_eq!(cfg.environment, Environment::Production);
        assert!(cfg.cors_allowed_origins.is_empty());
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("PORT", "8081"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("RATE_LIMIT_MAX", "5"),
            ("RATE_LIMIT_WINDOW_SECS", "60"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 8081);
        assert_eq!(
            cfg.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(cfg.rate_limit.max_requests, 5);
        assert_eq!(cfg.rate_limit.window_secs, 60);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("PORT", "eighty")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("APP_ENV", "staging")])),
            Err(ConfigError::InvalidEnvironment(_))
        ));
    }
}
