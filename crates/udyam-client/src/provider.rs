//! # HTTP Verification Provider
//!
//! Calls a running verification service over HTTP and exposes it as a
//! [`VerificationProvider`].
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/health` | [`HttpVerificationProvider::health`] |
//! | POST   | `/api/generate-otp` | [`HttpVerificationProvider::generate_otp`] |
//! | POST   | `/api/verify-otp` | [`HttpVerificationProvider::verify_otp`] |
//! | POST   | `/api/verify-tax-id` | [`HttpVerificationProvider::verify_tax_id`] |
//!
//! A 400 from `verify-otp` is a rejected code, not a failure; every other
//! non-2xx status becomes a [`ClientError::Api`].

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use udyam_core::{
    CodeCheck, CodeDispatch, CodeRequest, CodeVerdict, ProviderError, SecondaryIdRequest,
    SecondaryIdVerdict, VerificationProvider,
};

use crate::config::VerificationApiConfig;
use crate::error::ClientError;
use crate::types::{
    Envelope, FailureBody, HealthStatus, OtpDispatchData, OtpVerificationData,
    TaxVerificationData,
};

/// Typed client for the verification service.
#[derive(Debug, Clone)]
pub struct HttpVerificationProvider {
    http: reqwest::Client,
    base_url: String,
}

impl HttpVerificationProvider {
    /// Create a client from configuration.
    pub fn new(config: VerificationApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        let base_url = config.base_url.as_str().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Create a client from `UDYAM_API_URL` / `UDYAM_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(VerificationApiConfig::from_env()?)
    }

    /// Check that the service is up.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let endpoint = "GET /api/health";
        let url = format!("{}/api/health", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let resp = check_status(endpoint, resp).await?;
        resp.json().await.map_err(|e| ClientError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }

    /// Request a one-time password.
    ///
    /// Calls `POST {base_url}/api/generate-otp`.
    pub async fn generate_otp(&self, req: &CodeRequest) -> Result<OtpDispatchData, ClientError> {
        self.post("POST /api/generate-otp", "/api/generate-otp", req)
            .await
    }

    /// Check a one-time password.
    ///
    /// Calls `POST {base_url}/api/verify-otp`.
    pub async fn verify_otp(&self, req: &CodeCheck) -> Result<OtpVerificationData, ClientError> {
        self.post("POST /api/verify-otp", "/api/verify-otp", req).await
    }

    /// Verify the tax identifier.
    ///
    /// Calls `POST {base_url}/api/verify-tax-id`.
    pub async fn verify_tax_id(
        &self,
        req: &SecondaryIdRequest,
    ) -> Result<TaxVerificationData, ClientError> {
        self.post("POST /api/verify-tax-id", "/api/verify-tax-id", req)
            .await
    }

    async fn post<B, T>(&self, endpoint: &str, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        tracing::debug!(endpoint, status = resp.status().as_u16(), "verification service responded");

        let resp = check_status(endpoint, resp).await?;
        let envelope: Envelope<T> =
            resp.json().await.map_err(|e| ClientError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })?;
        envelope.data.ok_or_else(|| ClientError::Api {
            endpoint: endpoint.into(),
            status: 200,
            message: format!("response carried no data: {}", envelope.message),
        })
    }
}

async fn check_status(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<FailureBody>(&body)
        .map(|f| f.message)
        .unwrap_or(body);
    Err(ClientError::Api {
        endpoint: endpoint.into(),
        status,
        message,
    })
}

#[async_trait]
impl VerificationProvider for HttpVerificationProvider {
    async fn request_code(&self, request: &CodeRequest) -> Result<CodeDispatch, ProviderError> {
        let data = self.generate_otp(request).await?;
        Ok(CodeDispatch {
            masked_mobile: data.mobile_number,
        })
    }

    async fn verify_code(&self, check: &CodeCheck) -> Result<CodeVerdict, ProviderError> {
        match self.verify_otp(check).await {
            Ok(_) => Ok(CodeVerdict::Verified),
            Err(ClientError::Api {
                status: 400,
                message,
                ..
            }) => Ok(CodeVerdict::Rejected { message }),
            Err(err) => Err(err.into()),
        }
    }

    async fn verify_secondary_id(
        &self,
        request: &SecondaryIdRequest,
    ) -> Result<SecondaryIdVerdict, ProviderError> {
        let data = self.verify_tax_id(request).await?;
        Ok(SecondaryIdVerdict {
            tax_id_verified: data.pan_verified,
            name_match: data.name_match,
            dob_match: data.dob_match,
        })
    }

    fn provider_name(&self) -> &str {
        "HttpVerificationProvider"
    }
}
