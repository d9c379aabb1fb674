//! # One-Time Code Endpoints
//!
//! Dispatch and check the code that proves control of the mobile number
//! linked to an identity number. Both delegate to the configured
//! [`VerificationProvider`](udyam_core::VerificationProvider).

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use udyam_core::{CodeCheck, CodeRequest, CodeVerdict};

use crate::error::{AppError, FailureBody};
use crate::extractors::{present, validated, Payload, Validate};
use crate::routes::SuccessBody;
use crate::state::AppState;

/// Code dispatch request.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOtpRequest {
    #[serde(default, alias = "aadhaar")]
    pub identity_number: Option<String>,
    #[serde(default, alias = "mobile")]
    pub mobile_number: Option<String>,
}

impl Validate for GenerateOtpRequest {
    fn validate(&self) -> Result<(), String> {
        if !present(&self.identity_number) || !present(&self.mobile_number) {
            return Err("Identity number and mobile number are required".to_string());
        }
        Ok(())
    }
}

/// Code check request. Missing fields are treated as empty.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default, alias = "aadhaar")]
    pub identity_number: Option<String>,
    #[serde(default, alias = "mobile")]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub otp: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtpSentData {
    /// Mobile number with its last four digits hidden.
    pub mobile_number: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifiedData {
    pub identity_verified: bool,
    pub mobile_verified: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/generate-otp", post(generate_otp))
        .route("/api/verify-otp", post(verify_otp))
}

/// POST /api/generate-otp -- Send a one-time code to the linked mobile.
#[utoipa::path(
    post,
    path = "/api/generate-otp",
    request_body = GenerateOtpRequest,
    responses(
        (status = 200, description = "OTP sent", body = SuccessBody<OtpSentData>),
        (status = 400, description = "Missing identity or mobile number", body = FailureBody),
        (status = 413, description = "Body over the size limit", body = FailureBody),
    ),
    tag = "otp"
)]
pub async fn generate_otp(
    State(state): State<AppState>,
    Payload(req): Payload<GenerateOtpRequest>,
) -> Result<Json<SuccessBody<OtpSentData>>, AppError> {
    let req = validated(req)?;
    let request = CodeRequest {
        identity_number: req.identity_number.unwrap_or_default().trim().to_string(),
        mobile_number: req.mobile_number.unwrap_or_default().trim().to_string(),
    };
    let dispatch = state.provider.request_code(&request).await?;
    tracing::info!(mobile = %dispatch.masked_mobile, "otp dispatched");
    Ok(Json(SuccessBody::new(
        "OTP sent successfully",
        OtpSentData {
            mobile_number: dispatch.masked_mobile,
        },
    )))
}

/// POST /api/verify-otp -- Check a one-time code.
#[utoipa::path(
    post,
    path = "/api/verify-otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "OTP accepted", body = SuccessBody<OtpVerifiedData>),
        (status = 400, description = "OTP rejected", body = FailureBody),
        (status = 413, description = "Body over the size limit", body = FailureBody),
    ),
    tag = "otp"
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    Payload(req): Payload<VerifyOtpRequest>,
) -> Result<Json<SuccessBody<OtpVerifiedData>>, AppError> {
    let check = CodeCheck {
        identity_number: req.identity_number.unwrap_or_default(),
        mobile_number: req.mobile_number.unwrap_or_default(),
        otp: req.otp.unwrap_or_default(),
    };
    match state.provider.verify_code(&check).await? {
        CodeVerdict::Verified => Ok(Json(SuccessBody::new(
            "OTP verified successfully",
            OtpVerifiedData {
                identity_verified: true,
                mobile_verified: true,
            },
        ))),
        CodeVerdict::Rejected { message } => Err(AppError::BadRequest(message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_accepted() {
        let req: GenerateOtpRequest =
            serde_json::from_str(r#"{"aadhaar":"123456789012","mobile":"9876543210"}"#).unwrap();
        assert_eq!(req.identity_number.as_deref(), Some("123456789012"));
        assert_eq!(req.mobile_number.as_deref(), Some("9876543210"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn blank_mobile_fails_validation() {
        let req: GenerateOtpRequest =
            serde_json::from_str(r#"{"identityNumber":"123456789012","mobileNumber":" "}"#)
                .unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            "Identity number and mobile number are required"
        );
    }

    #[test]
    fn empty_body_deserializes() {
        let req: VerifyOtpRequest = serde_json::from_str("{}").unwrap();
        assert!(req.otp.is_none());
    }
}
