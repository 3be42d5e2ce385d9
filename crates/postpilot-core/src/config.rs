use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, for tests
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as unset so `FOO=` in a .env file disables a feature.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("POSTPILOT_ENV", "development"))?;
    let bind_addr = parse_addr("POSTPILOT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("POSTPILOT_LOG_LEVEL", "info");

    let database_url = optional("DATABASE_URL");
    let user_id = optional("POSTPILOT_USER_ID")
        .map(|raw| {
            uuid::Uuid::parse_str(&raw).map_err(|e| ConfigError::InvalidEnvVar {
                var: "POSTPILOT_USER_ID".to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()?;

    let brandfetch_api_key = optional("BRANDFETCH_API_KEY");
    let brandfetch_base_url = or_default(
        "POSTPILOT_BRANDFETCH_BASE_URL",
        "https://api.brandfetch.io",
    );
    let brandfetch_timeout_secs = parse_u64("POSTPILOT_BRANDFETCH_TIMEOUT_SECS", "15")?;
    let brand_cache_ttl_secs = parse_u64("POSTPILOT_BRAND_CACHE_TTL_SECS", "3600")?;
    let state_path = PathBuf::from(or_default("POSTPILOT_STATE_PATH", "./.postpilot/state.json"));

    let db_max_connections = parse_u32("POSTPILOT_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("POSTPILOT_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("POSTPILOT_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        database_url,
        user_id,
        brandfetch_api_key,
        brandfetch_base_url,
        brandfetch_timeout_secs,
        brand_cache_ttl_secs,
        state_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "POSTPILOT_ENV".to_string(),
            reason: format!("expected development, test, or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
