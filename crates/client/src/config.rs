//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `APPWRITE_ENDPOINT` - Appwrite API endpoint (e.g., <https://cloud.appwrite.io/v1>)
//! - `APPWRITE_PROJECT_ID` - Appwrite project ID
//! - `APPWRITE_DATABASE_ID` - Database holding the menu collections
//! - `APPWRITE_MENU_COLLECTION_ID` - Menu items collection
//!
//! ## Optional
//! - `APPWRITE_CATEGORIES_COLLECTION_ID` - Categories collection (default: categories)
//! - `APPWRITE_USER_COLLECTION_ID` - User profile collection (default: user)
//! - `IMAGE_CACHE_CAPACITY` - Max cached images (default: 256)
//! - `IMAGE_CACHE_TTL_SECS` - Cached image lifetime (default: 3600)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Appwrite backend configuration
    pub appwrite: AppwriteConfig,
    /// Local image cache configuration
    pub image_cache: ImageCacheConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

/// Appwrite project and collection identifiers.
#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    /// API endpoint without trailing slash
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub menu_collection_id: String,
    pub categories_collection_id: String,
    pub user_collection_id: String,
}

/// Image cache sizing.
#[derive(Debug, Clone, Copy)]
pub struct ImageCacheConfig {
    /// Maximum number of cached images
    pub max_capacity: u64,
    /// How long a cached image stays fresh
    pub time_to_live: Duration,
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 256,
            time_to_live: Duration::from_secs(3600),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            appwrite: AppwriteConfig::from_env()?,
            image_cache: ImageCacheConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

impl AppwriteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: normalize_endpoint("APPWRITE_ENDPOINT", &get_required_env("APPWRITE_ENDPOINT")?)?,
            project_id: get_required_env("APPWRITE_PROJECT_ID")?,
            database_id: get_required_env("APPWRITE_DATABASE_ID")?,
            menu_collection_id: get_required_env("APPWRITE_MENU_COLLECTION_ID")?,
            categories_collection_id: get_env_or_default(
                "APPWRITE_CATEGORIES_COLLECTION_ID",
                "categories",
            ),
            user_collection_id: get_env_or_default("APPWRITE_USER_COLLECTION_ID", "user"),
        })
    }
}

impl ImageCacheConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let max_capacity = get_parsed_env("IMAGE_CACHE_CAPACITY", defaults.max_capacity)?;
        let ttl_secs = get_parsed_env("IMAGE_CACHE_TTL_SECS", defaults.time_to_live.as_secs())?;

        Ok(Self {
            max_capacity,
            time_to_live: Duration::from_secs(ttl_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable parsed into `T`, falling back to `default`.
fn get_parsed_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |value| {
        value
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Validate an endpoint URL and strip any trailing slash.
fn normalize_endpoint(key: &str, value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}
