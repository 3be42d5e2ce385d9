use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use postpilot_brandfetch::{BrandfetchError, NormalizedBrand};
use serde::Serialize;
use serde_json::Value;

use crate::middleware::RequestId;

use super::AppState;

/// Flat error body, e.g. `{"error": "Brand not found", "domain": "acme.com"}`.
#[derive(Debug, Serialize)]
pub(super) struct BrandApiError {
    #[serde(skip)]
    status: StatusCode,
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
}

impl BrandApiError {
    fn new(status: StatusCode, error: &'static str) -> Self {
        Self {
            status,
            error,
            domain: None,
        }
    }

    fn from_lookup(request_id: &str, error: BrandfetchError) -> Self {
        match error {
            BrandfetchError::InvalidDomain => Self::new(StatusCode::BAD_REQUEST, "Invalid domain"),
            BrandfetchError::NotFound { domain } => Self {
                status: StatusCode::NOT_FOUND,
                error: "Brand not found",
                domain: Some(domain),
            },
            BrandfetchError::UnexpectedStatus { status, domain } => {
                tracing::error!(request_id, status, domain = %domain, "brand lookup failed upstream");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch brand data",
                )
            }
            other => {
                tracing::error!(request_id, error = %other, "brand lookup failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for BrandApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// `POST /api/brandfetch` with body `{"domain": "..."}`.
///
/// The body is read raw so that malformed JSON gets the same 400 as a
/// missing domain instead of axum's extractor rejection.
pub(super) async fn lookup_brand(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<NormalizedBrand>, BrandApiError> {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let domain = payload
        .get("domain")
        .and_then(Value::as_str)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| BrandApiError::new(StatusCode::BAD_REQUEST, "Domain is required"))?;

    let brand = state
        .brands
        .lookup(domain)
        .await
        .map_err(|e| BrandApiError::from_lookup(&req_id.0, e))?;

    Ok(Json(brand))
}
