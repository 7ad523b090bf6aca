//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CATALOG_API_URL` - Catalog API base URL (default: <https://fakestoreapi.com>)
//! - `STOREFRONT_STATIC_DIR` - Directory served under `/static` (default: the
//!   crate's `static/` directory)
//! - `STOREFRONT_SECURE_COOKIES` - Mark the session cookie `Secure` (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0 to 1.0 (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_API_URL: &str = "https://fakestoreapi.com";
const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the product catalog API
    pub catalog_api_url: Url,
    /// Directory of stylesheets and other static assets
    pub static_dir: PathBuf,
    /// Whether the session cookie requires HTTPS
    pub secure_cookies: bool,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry DSN; tracking is disabled when unset
    pub dsn: Option<String>,
    /// Environment tag attached to events
    pub environment: Option<String>,
    /// Fraction of error events sent
    pub sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
        }
    }
}

impl StorefrontConfig {
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let host = env.parse_or("STOREFRONT_HOST", "127.0.0.1", |v| v.parse::<IpAddr>())?;
        let port = env.parse_or("STOREFRONT_PORT", "3000", |v| v.parse::<u16>())?;
        let catalog_api_url = env.parse_or("CATALOG_API_URL", DEFAULT_CATALOG_API_URL, |v| {
            let url = Url::parse(v).map_err(|e| e.to_string())?;
            if matches!(url.scheme(), "http" | "https") {
                Ok(url)
            } else {
                Err(format!("unsupported scheme '{}'", url.scheme()))
            }
        })?;
        let static_dir = PathBuf::from(
            env.optional("STOREFRONT_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        );
        let secure_cookies =
            env.parse_or("STOREFRONT_SECURE_COOKIES", "false", |v| v.parse::<bool>())?;
        let sample_rate = env.parse_or("SENTRY_SAMPLE_RATE", "1.0", |v| {
            let rate = v.parse::<f32>().map_err(|e| e.to_string())?;
            if (0.0..=1.0).contains(&rate) {
                Ok(rate)
            } else {
                Err(format!("must be between 0.0 and 1.0 (got {rate})"))
            }
        })?;

        Ok(Self {
            host,
            port,
            catalog_api_url,
            static_dir,
            secure_cookies,
            sentry: SentryConfig {
                dsn: env.optional("SENTRY_DSN"),
                environment: env.optional("SENTRY_ENVIRONMENT"),
                sample_rate,
            },
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T, E: ToString>(
        &self,
        key: &str,
        default: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> Result<T, ConfigError> {
        let value = self.optional(key).unwrap_or_else(|| default.to_string());
        parse(value.trim()).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.catalog_api_url.as_str(), "https://fakestoreapi.com/");
        assert!(config.sentry.dsn.is_none());
        assert!((config.sentry.sample_rate - 1.0).abs() < f32::EPSILON);
        assert!(!config.secure_cookies);
        assert!(config.static_dir.is_absolute());
        assert!(config.static_dir.join("css/main.css").is_file());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("CATALOG_API_URL", "http://localhost:9000/api"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
            ("SENTRY_SAMPLE_RATE", "0.25"),
            ("STOREFRONT_STATIC_DIR", "/srv/fakestore/static"),
            ("STOREFRONT_SECURE_COOKIES", "true"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.catalog_api_url.as_str(), "http://localhost:9000/api");
        assert!(config.sentry.dsn.is_some());
        assert!((config.sentry.sample_rate - 0.25).abs() < f32::EPSILON);
        assert_eq!(config.static_dir, PathBuf::from("/srv/fakestore/static"));
        assert!(config.secure_cookies);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = load(&[("STOREFRONT_PORT", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry.dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "70000")]).unwrap_err();
        assert!(err.to_string().starts_with("Invalid environment variable STOREFRONT_PORT"));
    }

    #[test]
    fn test_invalid_catalog_url() {
        assert!(load(&[("CATALOG_API_URL", "not a url")]).is_err());
        assert!(load(&[("CATALOG_API_URL", "ftp://example.com")]).is_err());
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert!(load(&[("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
        assert!(load(&[("SENTRY_SAMPLE_RATE", "often")]).is_err());
    }

    #[test]
    fn test_invalid_secure_cookies() {
        let err = load(&[("STOREFRONT_SECURE_COOKIES", "sometimes")]).unwrap_err();
        assert!(err.to_string().contains("STOREFRONT_SECURE_COOKIES"));
    }
}
