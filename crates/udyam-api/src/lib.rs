//! # udyam-api -- Verification Service for the Udyam Registration Form
//!
//! A stub service the form flow can run against over HTTP. Code dispatch,
//! code checks and tax identifier checks are delegated to a
//! [`VerificationProvider`](udyam_core::VerificationProvider); by default the
//! in-process demo provider, which accepts the code `123456` and approves
//! every tax identifier.
//!
//! ## API Surface
//!
//! | Route                    | Module               |
//! |--------------------------|----------------------|
//! | `GET /api/health`        | [`routes::health`]   |
//! | `POST /api/generate-otp` | [`routes::otp`]      |
//! | `POST /api/verify-otp`   | [`routes::otp`]      |
//! | `POST /api/verify-tax-id`| [`routes::tax_id`]   |
//! | `POST /api/verify-pan`   | [`routes::tax_id`]   |
//! | `GET /api/openapi.json`  | [`openapi`]          |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! Trace → SecurityHeaders → CatchPanic → CORS → RateLimit → BodyLimit → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::any::Any;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::{AppError, NOT_FOUND_MESSAGE};
use crate::middleware::rate_limit::RateLimiter;
use crate::state::AppState;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let limiter = RateLimiter::new(state.config.rate_limit.clone());
    let cors = cors_layer(&state.config.cors_allowed_origins);

    let router = Router::new()
        .merge(routes::health::router())
        .merge(routes::otp::router())
        .merge(routes::tax_id::router())
        .merge(openapi::router())
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(from_fn(middleware::rate_limit::rate_limit_middleware))
        .layer(axum::Extension(limiter))
        .layer(cors)
        .with_state(state);

    harden(router)
}

/// Outer layers shared by every response, panics included.
fn harden(router: Router) -> Router {
    let router = router.layer(CatchPanicLayer::custom(handle_panic));
    middleware::security_headers::apply(router).layer(middleware::tracing_layer::layer())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn not_found() -> AppError {
    AppError::NotFound(NOT_FOUND_MESSAGE.to_string())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}
