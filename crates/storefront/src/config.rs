//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `METRIKS_BASE_URL` - Site serving `/catalog` and `/api/submit-request`
//!   (default: `http://127.0.0.1:8000`)
//! - `METRIKS_CART_PATH` - File backing the local cart storage
//!   (default: `.metriks/storage.json`)
//! - `METRIKS_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Path of the server-rendered catalog page.
pub const CATALOG_PATH: &str = "/catalog";

/// Path accepting order request submissions.
pub const SUBMIT_REQUEST_PATH: &str = "/api/submit-request";

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_CART_PATH: &str = ".metriks/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format for the CLI subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

/// Catalog widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Base URL of the site; catalog and submission paths are joined onto it
    pub base_url: Url,
    /// File used as local storage by file-backed sessions
    pub cart_path: PathBuf,
    pub log_format: LogFormat,
}

impl WidgetConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_env_or_default("METRIKS_BASE_URL", DEFAULT_BASE_URL))?;
        let cart_path = PathBuf::from(get_env_or_default("METRIKS_CART_PATH", DEFAULT_CART_PATH));
        let log_format = get_env_or_default("METRIKS_LOG_FORMAT", "pretty")
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("METRIKS_LOG_FORMAT".to_string(), e))?;

        Ok(Self {
            base_url,
            cart_path,
            log_format,
        })
    }

    /// Configuration pointing at `base_url` with default paths.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not an absolute http(s) URL.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            cart_path: PathBuf::from(DEFAULT_CART_PATH),
            log_format: LogFormat::default(),
        })
    }

    /// Absolute URL of the catalog page.
    #[must_use]
    pub fn catalog_url(&self) -> Url {
        join(&self.base_url, CATALOG_PATH)
    }

    /// Absolute URL of the order submission endpoint.
    #[must_use]
    pub fn submit_url(&self) -> Url {
        join(&self.base_url, SUBMIT_REQUEST_PATH)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("METRIKS_BASE_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "METRIKS_BASE_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

fn join(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url.set_query(None);
    url
}
