//! # Tax Identifier Verification
//!
//! Stub endpoint: the supplied fields are forwarded to the provider, which
//! in the demo configuration approves every request, including one with no
//! body at all.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use udyam_core::SecondaryIdRequest;

use crate::error::{AppError, FailureBody};
use crate::extractors::Payload;
use crate::routes::SuccessBody;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTaxIdRequest {
    #[serde(default, alias = "aadhaar")]
    pub identity_number: Option<String>,
    #[serde(default, alias = "pan")]
    pub tax_id: Option<String>,
    #[serde(default, alias = "name")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
}

/// Field names kept from the PAN-era wire format.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxIdVerifiedData {
    pub pan_verified: bool,
    pub name_match: bool,
    pub dob_match: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/verify-tax-id", post(verify_tax_id))
        .route("/api/verify-pan", post(verify_tax_id))
}

/// POST /api/verify-tax-id -- Verify tax identifier, name and date of birth.
#[utoipa::path(
    post,
    path = "/api/verify-tax-id",
    request_body = VerifyTaxIdRequest,
    responses(
        (status = 200, description = "Tax ID verified", body = SuccessBody<TaxIdVerifiedData>),
        (status = 400, description = "Malformed body", body = FailureBody),
        (status = 413, description = "Body over the size limit", body = FailureBody),
    ),
    tag = "tax"
)]
pub async fn verify_tax_id(
    State(state): State<AppState>,
    Payload(req): Payload<VerifyTaxIdRequest>,
) -> Result<Json<SuccessBody<TaxIdVerifiedData>>, AppError> {
    let request = SecondaryIdRequest {
        identity_number: req.identity_number.unwrap_or_default(),
        tax_id: req.tax_id.unwrap_or_default(),
        full_name: req.full_name.unwrap_or_default(),
        date_of_birth: req.date_of_birth.unwrap_or_default(),
    };
    let verdict = state.provider.verify_secondary_id(&request).await?;
    Ok(Json(SuccessBody::new(
        "Tax ID verified successfully",
        TaxIdVerifiedData {
            pan_verified: verdict.tax_id_verified,
            name_match: verdict.name_match,
            dob_match: verdict.dob_match,
        },
    )))
}
