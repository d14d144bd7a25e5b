use std::path::PathBuf;
use std::str::FromStr;

use grokmind_core::locale::Locale;

/// An environment variable that is set but cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value '{value}' for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Host placed in generated share links (default: `localhost:3000`).
    pub public_host: String,
    /// Locale used when a request names none (default: `en`).
    pub default_locale: Locale,
    /// Optional catalog JSON replacing the bundled one.
    pub catalog_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PUBLIC_HOST`          | `localhost:3000`           |
    /// | `DEFAULT_LOCALE`       | `en`                       |
    /// | `CATALOG_PATH`         | unset (bundled catalog)    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_env("PORT", "3000")?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", "30")?;
        let public_host =
            std::env::var("PUBLIC_HOST").unwrap_or_else(|_| "localhost:3000".into());
        let default_locale = parse_env("DEFAULT_LOCALE", "en")?;
        let catalog_path = std::env::var("CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_host,
            default_locale,
            catalog_path,
        })
    }
}

fn parse_env<T>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(ConfigError {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
