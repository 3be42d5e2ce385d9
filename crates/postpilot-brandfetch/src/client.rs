//! HTTP client for the Brandfetch v2 brand API.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::BrandfetchError;
use crate::types::BrandLookupResult;

const DEFAULT_BASE_URL: &str = "https://api.brandfetch.io/";

/// Client for `GET /v2/brands/{domain}`.
///
/// Use [`BrandfetchClient::new`] for production or
/// [`BrandfetchClient::with_base_url`] to point at a mock server in tests.
pub struct BrandfetchClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl BrandfetchClient {
    /// Creates a new client pointed at the production Brandfetch API.
    ///
    /// # Errors
    ///
    /// Returns [`BrandfetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, BrandfetchError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`BrandfetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`BrandfetchError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, BrandfetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("postpilot/0.1 (brand-lookup)")
            .build()?;

        // Exactly one trailing slash, so path segments are appended rather
        // than replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| BrandfetchError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BrandfetchError::InvalidBaseUrl(normalised));
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches the raw brand record for an already-cleaned domain.
    ///
    /// # Errors
    ///
    /// - [`BrandfetchError::NotFound`] when upstream answers 404.
    /// - [`BrandfetchError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`BrandfetchError::Http`] on network failure or timeout.
    /// - [`BrandfetchError::Deserialize`] if the body is not a brand record.
    pub async fn fetch_brand(&self, domain: &str) -> Result<BrandLookupResult, BrandfetchError> {
        let url = self.brand_url(domain);
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BrandfetchError::NotFound {
                domain: domain.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, domain, body = %body, "brandfetch returned non-success status");
            return Err(BrandfetchError::UnexpectedStatus {
                status: status.as_u16(),
                domain: domain.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| BrandfetchError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// `{base}/v2/brands/{domain}` with the domain as one encoded segment.
    fn brand_url(&self, domain: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["v2", "brands", domain]);
        }
        url
    }
}
