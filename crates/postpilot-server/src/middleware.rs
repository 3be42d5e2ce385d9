use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use subtle::ConstantTimeEq;
use tokio::sync::Mutex;
use uuid::Uuid;

const API_KEYS_VAR: &str = "POSTPILOT_API_KEYS";
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id of the current request, available as an extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Bearer token settings used by [`require_bearer_auth`].
#[derive(Debug, Clone)]
pub struct AuthState {
    api_keys: Arc<Vec<String>>,
    pub enabled: bool,
}

impl AuthState {
    /// Builds auth config from `POSTPILOT_API_KEYS` (comma-separated tokens).
    ///
    /// # Errors
    ///
    /// Fails outside development when no keys are configured.
    pub fn from_env(is_development: bool) -> anyhow::Result<Self> {
        let raw = std::env::var(API_KEYS_VAR).unwrap_or_default();
        Self::from_keys(&raw, is_development)
    }

    /// Empty keys disable auth in development and fail startup elsewhere.
    ///
    /// # Errors
    ///
    /// Fails outside development when `raw` holds no keys.
    pub fn from_keys(raw: &str, is_development: bool) -> anyhow::Result<Self> {
        let mut keys: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        keys.sort();
        keys.dedup();

        if keys.is_empty() {
            if is_development {
                tracing::warn!(
                    "{API_KEYS_VAR} not set; bearer auth disabled in development environment"
                );
                return Ok(Self::disabled());
            }

            anyhow::bail!(
                "{API_KEYS_VAR} is required outside development; provide comma-separated bearer tokens"
            );
        }

        Ok(Self {
            api_keys: Arc::new(keys),
            enabled: true,
        })
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            api_keys: Arc::new(Vec::new()),
            enabled: false,
        }
    }

    fn allows(&self, candidate: &str) -> bool {
        self.api_keys
            .iter()
            .fold(false, |found, key| {
                found | bool::from(key.as_bytes().ct_eq(candidate.as_bytes()))
            })
    }
}

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

/// Fixed-window request limiter with one window per client IP.
///
/// The client is the TCP peer from [`ConnectInfo`]. Requests without it, or
/// all requests arriving through one reverse proxy, share a single window.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    clients: Arc<Mutex<HashMap<Option<IpAddr>, RateLimitWindow>>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Counts one request from `client`; `false` once its budget is spent.
    async fn admit(&self, client: Option<IpAddr>) -> bool {
        let mut clients = self.clients.lock().await;
        clients.retain(|_, w| w.started_at.elapsed() < self.window);

        let entry = clients.entry(client).or_insert_with(|| RateLimitWindow {
            started_at: Instant::now(),
            count: 0,
        });
        if entry.count >= self.max_requests {
            return false;
        }
        entry.count += 1;
        true
    }
}

/// `{"error": {"code": .., "message": ..}}`, the envelope every middleware
/// rejection uses.
#[derive(Debug, Serialize)]
struct Rejection {
    error: RejectionDetail,
}

#[derive(Debug, Serialize)]
struct RejectionDetail {
    code: &'static str,
    message: &'static str,
}

fn reject(status: StatusCode, code: &'static str, message: &'static str) -> Response {
    let body = Rejection {
        error: RejectionDetail { code, message },
    };
    (status, Json(body)).into_response()
}

/// Tags every request with a [`RequestId`]: the caller's `x-request-id` when
/// sent, a fresh `UUIDv4` otherwise. The id is echoed back on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let incoming = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);
    let id = incoming.unwrap_or_else(|| Uuid::new_v4().to_string());
    req.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(req).await;
    if let Ok(echo) = HeaderValue::try_from(id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, echo);
    }
    response
}

/// Rejects requests without a configured bearer token with 401. A disabled
/// [`AuthState`] lets everything through.
pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    let authorized = !auth.enabled
        || bearer_token(req.headers().get(AUTHORIZATION)).is_some_and(|t| auth.allows(t));
    if authorized {
        next.run(req).await
    } else {
        reject(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "missing or invalid bearer token",
        )
    }
}

/// Middleware rejecting clients that exhausted their window with 429.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let client = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    if !rate_limit.admit(client).await {
        tracing::debug!(client = ?client, "rate limit exceeded");
        return reject(
            StatusCode::TOO_MANY_REQUESTS,
            "rate_limited",
            "rate limit exceeded",
        );
    }

    next.run(req).await
}

fn bearer_token(header: Option<&HeaderValue>) -> Option<&str> {
    let token = header?.to_str().ok()?.strip_prefix("Bearer ")?;
    (!token.trim().is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_reads_authorization_value() {
        let header = HeaderValue::from_static("Bearer pp_live_123");
        assert_eq!(bearer_token(Some(&header)), Some("pp_live_123"));
    }

    #[test]
    fn bearer_token_ignores_other_schemes_and_blank_tokens() {
        for raw in ["Basic dXNlcjpwYXNz", "Bearer    ", "pp_live_123"] {
            let header = HeaderValue::from_static(raw);
            assert_eq!(bearer_token(Some(&header)), None, "{raw:?}");
        }
        assert_eq!(bearer_token(None), None);
    }

    #[test]
    fn empty_keys_disable_auth_in_development() {
        let state = AuthState::from_keys("", true).expect("dev should allow missing keys");
        assert!(!state.enabled);
    }

    #[test]
    fn empty_keys_fail_outside_development() {
        assert!(AuthState::from_keys(" , ", false).is_err());
    }

    #[tokio::test]
    async fn rate_limit_budgets_are_per_client() {
        let limiter = RateLimitState::new(2, Duration::from_secs(60));
        let alice = Some(IpAddr::from([10, 0, 0, 1]));
        let bob = Some(IpAddr::from([10, 0, 0, 2]));

        assert!(limiter.admit(alice).await);
        assert!(limiter.admit(alice).await);
        assert!(!limiter.admit(alice).await);

        assert!(limiter.admit(bob).await);
        assert!(limiter.admit(None).await);
    }

    #[tokio::test]
    async fn rate_limit_window_resets_after_expiry() {
        let limiter = RateLimitState::new(1, Duration::from_millis(20));
        let client = Some(IpAddr::from([127, 0, 0, 1]));

        assert!(limiter.admit(client).await);
        assert!(!limiter.admit(client).await);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(limiter.admit(client).await);
    }

    #[test]
    fn configured_keys_are_trimmed_and_matched_exactly() {
        let state = AuthState::from_keys(" alpha , beta,", false).expect("keys");
        assert!(state.enabled);
        assert!(state.allows("alpha"));
        assert!(state.allows("beta"));
        assert!(!state.allows("alph"));
        assert!(!state.allows("alpha "));
    }
}
