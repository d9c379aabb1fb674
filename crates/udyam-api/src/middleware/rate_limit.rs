//! # Per-Client Rate Limiting
//!
//! Fixed-window limiter keyed by client IP address. In-memory only; each
//! process keeps its own counters.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use parking_lot::Mutex;

use crate::error::{AppError, RATE_LIMITED_MESSAGE};

/// Total requests allowed per window.
pub const LIMIT_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-limit");
/// Requests left in the current window.
pub const REMAINING_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Bucket count above which closed windows are swept on the next check.
const PRUNE_THRESHOLD: usize = 10_000;

/// Rate limiter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u64,
    /// Window duration in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_secs: 15 * 60,
        }
    }
}

/// Per-key rate limit state.
#[derive(Debug, Clone)]
struct BucketState {
    count: u64,
    window_start: Instant,
}

/// Result of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u64 },
    Limited { retry_after: Duration },
}

/// Shared rate limiter state.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    buckets: Arc<Mutex<HashMap<String, BucketState>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Count a request from `key` arriving now.
    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now())
    }

    /// Count a request from `key` arriving at `now`.
    pub fn check_at(&self, key: &str, now: Instant) -> Decision {
        let window = Duration::from_secs(self.config.window_secs);
        let mut buckets = self.buckets.lock();
        if buckets.len() >= PRUNE_THRESHOLD {
            retain_open(&mut buckets, now, window);
        }

        let bucket = buckets.entry(key.to_string()).or_insert(BucketState {
            count: 0,
            window_start: now,
        });

        if now.saturating_duration_since(bucket.window_start) >= window {
            bucket.count = 0;
            bucket.window_start = now;
        }

        if bucket.count >= self.config.max_requests {
            let elapsed = now.saturating_duration_since(bucket.window_start);
            Decision::Limited {
                retry_after: window.saturating_sub(elapsed),
            }
        } else {
            bucket.count += 1;
            Decision::Allowed {
                remaining: self.config.max_requests - bucket.count,
            }
        }
    }

    /// Drop buckets whose window has closed.
    pub fn prune(&self, now: Instant) {
        let window = Duration::from_secs(self.config.window_secs);
        retain_open(&mut self.buckets.lock(), now, window);
    }

    pub fn tracked_clients(&self) -> usize {
        self.buckets.lock().len()
    }
}

fn retain_open(buckets: &mut HashMap<String, BucketState>, now: Instant, window: Duration) {
    buckets.retain(|_, b| now.saturating_duration_since(b.window_start) < window);
}

/// Identify the caller: the peer address when the server exposes it,
/// otherwise the first `X-Forwarded-For` hop, otherwise `"anonymous"`.
pub fn client_key(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    forwarded_for(request.headers()).unwrap_or_else(|| "anonymous".to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Middleware that enforces per-client rate limits.
///
/// Requests over the limit get a 429 with `Retry-After`; allowed responses
/// carry `X-RateLimit-Limit` and `X-RateLimit-Remaining`.
pub async fn rate_limit_middleware(request: Request, next: Next) -> Response {
    let Some(limiter) = request.extensions().get::<RateLimiter>().cloned() else {
        return next.run(request).await;
    };

    let key = client_key(&request);
    match limiter.check(&key) {
        Decision::Allowed { remaining } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert(LIMIT_HEADER, HeaderValue::from(limiter.config.max_requests));
            headers.insert(REMAINING_HEADER, HeaderValue::from(remaining));
            response
        }
        Decision::Limited { retry_after } => {
            tracing::warn!(client = %key, "rate limit exceeded");
            let mut response =
                AppError::RateLimited(RATE_LIMITED_MESSAGE.to_string()).into_response();
            let secs = retry_after.as_secs().max(1);
            response
                .headers_mut()
                .insert(axum::http::header::RETRY_AFTER, HeaderValue::from(secs));
            response
        }
    }
}
