//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document,
//! served at `/api/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the verification API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Udyam Verification API",
        version = "0.1.0",
        description = "Stub verification service backing the Udyam registration form: one-time code dispatch and check, and tax identifier verification."
    ),
    paths(
        crate::routes::health::health,
        crate::routes::otp::generate_otp,
        crate::routes::otp::verify_otp,
        crate::routes::tax_id::verify_tax_id,
    ),
    components(schemas(
        crate::error::FailureBody,
        crate::routes::health::HealthResponse,
        crate::routes::otp::GenerateOtpRequest,
        crate::routes::otp::VerifyOtpRequest,
        crate::routes::otp::OtpSentData,
        crate::routes::otp::OtpVerifiedData,
        crate::routes::tax_id::VerifyTaxIdRequest,
        crate::routes::tax_id::TaxIdVerifiedData,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "otp", description = "One-time code dispatch and check"),
        (name = "tax", description = "Tax identifier verification"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/openapi.json", get(openapi_json))
}

/// GET /api/openapi.json -- Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/health",
            "/api/generate-otp",
            "/api/verify-otp",
            "/api/verify-tax-id",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
