//! # Custom Extractors & Validation
//!
//! [`Payload`] reads a request body sent either as JSON or as an
//! URL-encoded form. An empty body yields `T::default()`, so request DTOs
//! whose fields are all optional see every field as absent. Rejections keep
//! the status axum assigns them (413 over the body limit, 415 for an
//! unsupported content type, 400 otherwise).
//!
//! The [`Validate`] trait carries business rules serde cannot express.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use crate::error::AppError;

const UNSUPPORTED_BODY: &str =
    "Expected request with `Content-Type: application/json` or `application/x-www-form-urlencoded`";

/// Trait for request types that can validate their business rules
/// beyond what serde deserialization checks.
pub trait Validate {
    /// Validate business rules. Returns an error message on failure.
    fn validate(&self) -> Result<(), String>;
}

/// Request body decoded from JSON or a URL-encoded form.
///
/// ```ignore
/// async fn handler(Payload(req): Payload<T>) -> Result<..., AppError> {
///     let req = validated(req)?;
///     // use req...
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

/// How a body is encoded, judged from its `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return BodyKind::Other;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else if mime == "application/json"
        || (mime.starts_with("application/") && mime.ends_with("+json"))
    {
        BodyKind::Json
    } else {
        BodyKind::Other
    }
}

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let kind = body_kind(req.headers());
        if kind == BodyKind::Form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|err| AppError::from_rejection(err.status(), err.body_text()))?;
            return Ok(Payload(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err| AppError::from_rejection(err.status(), err.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload(T::default()));
        }
        match kind {
            BodyKind::Json => Json::<T>::from_bytes(&bytes)
                .map(|Json(value)| Payload(value))
                .map_err(|err| AppError::from_rejection(err.status(), err.body_text())),
            _ => Err(AppError::UnsupportedMediaType(UNSUPPORTED_BODY.to_string())),
        }
    }
}

/// Run the [`Validate`] rules, mapping a failure to [`AppError::Validation`].
pub fn validated<T: Validate>(value: T) -> Result<T, AppError> {
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

/// Treat a missing or whitespace-only string as absent.
pub fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    struct Named(Option<String>);

    impl Validate for Named {
        fn validate(&self) -> Result<(), String> {
            if present(&self.0) {
                Ok(())
            } else {
                Err("name is required".into())
            }
        }
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Fields {
        #[serde(default)]
        tax_id: Option<String>,
        #[serde(default)]
        full_name: Option<String>,
    }

    fn request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<Fields, AppError> {
        Payload::<Fields>::from_request(request(content_type, body), &())
            .await
            .map(|Payload(v)| v)
    }

    #[test]
    fn valid_body_passes() {
        assert!(validated(Named(Some("Asha".into()))).is_ok());
    }

    #[test]
    fn blank_value_fails_validation() {
        match validated(Named(Some("  ".into()))) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "name is required"),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn present_checks() {
        assert!(!present(&None));
        assert!(!present(&Some(String::new())));
        assert!(present(&Some("9876543210".into())));
    }

    #[test]
    fn content_type_parameters_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, "Application/JSON; charset=utf-8".parse().unwrap());
        assert_eq!(body_kind(&headers), BodyKind::Json);
        headers.insert(CONTENT_TYPE, "application/problem+json".parse().unwrap());
        assert_eq!(body_kind(&headers), BodyKind::Json);
        headers.insert(CONTENT_TYPE, "application/x-www-form-urlencoded".parse().unwrap());
        assert_eq!(body_kind(&headers), BodyKind::Form);
        headers.insert(CONTENT_TYPE, "text/plain".parse().unwrap());
        assert_eq!(body_kind(&headers), BodyKind::Other);
        assert_eq!(body_kind(&HeaderMap::new()), BodyKind::Other);
    }

    #[tokio::test]
    async fn json_and_form_decode_alike() {
        let json = extract(
            Some("application/json"),
            r#"{"taxId":"ABCDE1234F","fullName":"Asha Verma"}"#,
        )
        .await
        .unwrap();
        let form = extract(
            Some("application/x-www-form-urlencoded"),
            "taxId=ABCDE1234F&fullName=Asha+Verma",
        )
        .await
        .unwrap();
        assert_eq!(json, form);
        assert_eq!(form.full_name.as_deref(), Some("Asha Verma"));
    }

    #[tokio::test]
    async fn empty_body_is_all_fields_absent() {
        let content_types = [
            None,
            Some("application/json"),
            Some("application/x-www-form-urlencoded"),
        ];
        for content_type in content_types {
            let fields = extract(content_type, "").await.unwrap();
            assert_eq!(fields, Fields::default(), "{content_type:?}");
        }
    }

    #[tokio::test]
    async fn unknown_content_type_with_body_is_unsupported() {
        let err = extract(Some("text/plain"), "taxId").await.unwrap_err();
        assert!(matches!(err, AppError::UnsupportedMediaType(_)));
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let err = extract(Some("application/json"), "{not json").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
