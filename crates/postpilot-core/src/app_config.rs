use std::net::SocketAddr;
use std::path::PathBuf;

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Backing store. `None` means no live data source is available.
    pub database_url: Option<String>,
    /// Authenticated user. `None` means the session runs on fixture data.
    pub user_id: Option<Uuid>,
    pub brandfetch_api_key: Option<String>,
    pub brandfetch_base_url: String,
    pub brandfetch_timeout_secs: u64,
    pub brand_cache_ttl_secs: u64,
    pub state_path: PathBuf,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl AppConfig {
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.env == Environment::Development
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("user_id", &self.user_id)
            .field(
                "brandfetch_api_key",
                &self.brandfetch_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("brandfetch_base_url", &self.brandfetch_base_url)
            .field("brandfetch_timeout_secs", &self.brandfetch_timeout_secs)
            .field("brand_cache_ttl_secs", &self.brand_cache_ttl_secs)
            .field("state_path", &self.state_path)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
