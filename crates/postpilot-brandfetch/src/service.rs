//! Brand lookup composed from domain cleaning, the upstream client, the
//! normalizer and a TTL cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use postpilot_core::{clean_domain, AppConfig};
use tokio::sync::Mutex;

use crate::client::BrandfetchClient;
use crate::error::BrandfetchError;
use crate::normalize::{normalize, placeholder_brand, NormalizedBrand};

/// Successful lookups keyed by clean domain. A zero TTL disables caching.
struct BrandCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, NormalizedBrand)>>,
}

impl BrandCache {
    fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    async fn get(&self, domain: &str) -> Option<NormalizedBrand> {
        if self.ttl.is_zero() {
            return None;
        }
        let mut entries = self.entries.lock().await;
        match entries.get(domain) {
            Some((stored_at, brand)) if stored_at.elapsed() < self.ttl => Some(brand.clone()),
            Some(_) => {
                entries.remove(domain);
                None
            }
            None => None,
        }
    }

    async fn insert(&self, domain: String, brand: NormalizedBrand) {
        if self.ttl.is_zero() {
            return;
        }
        let mut entries = self.entries.lock().await;
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);
        entries.insert(domain, (Instant::now(), brand));
    }
}

/// Resolves raw user input to a [`NormalizedBrand`].
///
/// Without an API key every lookup yields a placeholder brand. Only
/// successful upstream lookups are cached; failures are never retried.
pub struct BrandLookupService {
    client: Option<BrandfetchClient>,
    cache: BrandCache,
}

impl BrandLookupService {
    #[must_use]
    pub fn new(client: Option<BrandfetchClient>, cache_ttl: Duration) -> Self {
        Self {
            client,
            cache: BrandCache::new(cache_ttl),
        }
    }

    /// Builds the service from application config. A missing
    /// `BRANDFETCH_API_KEY` yields a placeholder-only service.
    ///
    /// # Errors
    ///
    /// Returns [`BrandfetchError`] if the HTTP client cannot be constructed
    /// or the configured base URL is invalid.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, BrandfetchError> {
        let client = config
            .brandfetch_api_key
            .as_deref()
            .map(|key| {
                BrandfetchClient::with_base_url(
                    key,
                    config.brandfetch_timeout_secs,
                    &config.brandfetch_base_url,
                )
            })
            .transpose()?;

        Ok(Self::new(
            client,
            Duration::from_secs(config.brand_cache_ttl_secs),
        ))
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.client.is_some()
    }

    /// Looks up the brand behind `raw_domain`.
    ///
    /// Inputs that clean to the same domain share one lookup and cache entry.
    ///
    /// # Errors
    ///
    /// - [`BrandfetchError::InvalidDomain`] when `raw_domain` cleans to empty.
    /// - Any upstream error from [`BrandfetchClient::fetch_brand`].
    pub async fn lookup(&self, raw_domain: &str) -> Result<NormalizedBrand, BrandfetchError> {
        let domain = clean_domain(raw_domain);
        if domain.is_empty() {
            return Err(BrandfetchError::InvalidDomain);
        }

        let Some(client) = &self.client else {
            tracing::info!(domain = %domain, "no brandfetch API key configured, returning placeholder brand");
            return Ok(placeholder_brand(&domain));
        };

        if let Some(brand) = self.cache.get(&domain).await {
            tracing::debug!(domain = %domain, "brand cache hit");
            return Ok(brand);
        }

        let result = client.fetch_brand(&domain).await?;
        let brand = normalize(&result, &domain);
        self.cache.insert(domain, brand.clone()).await;
        Ok(brand)
    }
}
