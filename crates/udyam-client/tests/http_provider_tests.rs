//! Contract tests for HttpVerificationProvider against a mocked service.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/api/health` | `health_*` |
//! | POST   | `/api/generate-otp` | `request_code_*` |
//! | POST   | `/api/verify-otp` | `verify_code_*` |
//! | POST   | `/api/verify-tax-id` | `verify_secondary_id_*` |

use udyam_client::{ClientError, HttpVerificationProvider, VerificationApiConfig};
use udyam_core::{
    CodeCheck, CodeRequest, CodeVerdict, ProviderError, SecondaryIdRequest, VerificationProvider,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> HttpVerificationProvider {
    let config = VerificationApiConfig::new(&server.uri()).unwrap().with_timeout_secs(5);
    HttpVerificationProvider::new(config).unwrap()
}

fn code_request() -> CodeRequest {
    CodeRequest {
        identity_number: "123456789012".into(),
        mobile_number: "9876543210".into(),
    }
}

fn code_check(otp: &str) -> CodeCheck {
    CodeCheck {
        identity_number: "123456789012".into(),
        mobile_number: "9876543210".into(),
        otp: otp.into(),
    }
}

// ── GET /api/health ──────────────────────────────────────────────────

#[tokio::test]
async fn health_parses_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Server is healthy",
            "timestamp": "2026-10-16T08:00:00Z"
        })))
        .mount(&server)
        .await;

    let health = provider(&server).health().await.unwrap();
    assert!(health.success);
    assert_eq!(health.message, "Server is healthy");
}

// ── POST /api/generate-otp ───────────────────────────────────────────

#[tokio::test]
async fn request_code_sends_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-otp"))
        .and(body_json(serde_json::json!({
            "identityNumber": "123456789012",
            "mobileNumber": "9876543210"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "OTP sent successfully",
            "data": { "mobileNumber": "987654****" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dispatch = provider(&server).request_code(&code_request()).await.unwrap();
    assert_eq!(dispatch.masked_mobile, "987654****");
}

#[tokio::test]
async fn request_code_maps_bad_request_to_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-otp"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "success": false,
            "message": "Identity number and mobile number are required"
        })))
        .mount(&server)
        .await;

    let err = provider(&server).request_code(&code_request()).await.unwrap_err();
    assert_eq!(
        err,
        ProviderError::Rejected {
            message: "Identity number and mobile number are required".into()
        }
    );
}

#[tokio::test]
async fn request_code_maps_too_many_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-otp"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "success": false,
            "message": "Too many requests from this IP, please try again later."
        })))
        .mount(&server)
        .await;

    let err = provider(&server).request_code(&code_request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::RateLimited { .. }));
}

#[tokio::test]
async fn request_code_maps_server_error_to_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-otp"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = provider(&server);
    match client.generate_otp(&code_request()).await.unwrap_err() {
        ClientError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("unexpected {other:?}"),
    }
    let err = client.request_code(&code_request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Unavailable { .. }));
}

#[tokio::test]
async fn request_code_unreachable_service_is_unavailable() {
    // Nothing listens on port 9 (discard) on a test host.
    let config = VerificationApiConfig::new("http://127.0.0.1:9")
        .unwrap()
        .with_timeout_secs(2);
    let client = HttpVerificationProvider::new(config).unwrap();
    let err = client.request_code(&code_request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Unavailable { .. }));
}

// ── POST /api/verify-otp ─────────────────────────────────────────────

#[tokio::test]
async fn verify_code_accepts_success_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/verify-otp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "OTP verified successfully",
            "data": { "identityVerified": true, "mobileVerified": true }
        })))
        .mount(&server)
        .await;

    let verdict = provider(&server).verify_code(&code_check("123456")).await.unwrap();
    assert_eq!(verdict, CodeVerdict::Verified);
}

#[tokio::test]
async fn verify_code_bad_request_is_a_rejected_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/verify-otp"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "success": false,
            "message": "Invalid OTP. Use 123456 for demo."
        })))
        .mount(&server)
        .await;

    let verdict = provider(&server).verify_code(&code_check("000000")).await.unwrap();
    assert_eq!(
        verdict,
        CodeVerdict::Rejected {
            message: "Invalid OTP. Use 123456 for demo.".into()
        }
    );
}

#[tokio::test]
async fn verify_code_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/verify-otp"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = provider(&server).verify_code(&code_check("123456")).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse { .. }));
}

// ── POST /api/verify-tax-id ──────────────────────────────────────────

#[tokio::test]
async fn verify_secondary_id_maps_pan_verified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/verify-tax-id"))
        .and(body_json(serde_json::json!({
            "identityNumber": "123456789012",
            "taxId": "ABCDE1234F",
            "fullName": "Asha Verma",
            "dateOfBirth": "1990-04-12"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Tax ID verified successfully",
            "data": { "panVerified": true, "nameMatch": false, "dobMatch": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SecondaryIdRequest {
        identity_number: "123456789012".into(),
        tax_id: "ABCDE1234F".into(),
        full_name: "Asha Verma".into(),
        date_of_birth: "1990-04-12".into(),
    };
    let verdict = provider(&server).verify_secondary_id(&request).await.unwrap();
    assert!(verdict.tax_id_verified);
    assert!(!verdict.name_match);
    assert!(!verdict.is_verified());
}
