use thiserror::Error;

/// Errors returned by the brand lookup client and service.
#[derive(Debug, Error)]
pub enum BrandfetchError {
    /// The requested domain is empty after cleaning.
    #[error("invalid domain")]
    InvalidDomain,

    /// Upstream answered 404 for the domain.
    #[error("brand not found: {domain}")]
    NotFound { domain: String },

    /// Upstream answered with any other non-2xx status.
    #[error("unexpected status {status} for {domain}")]
    UnexpectedStatus { status: u16, domain: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
