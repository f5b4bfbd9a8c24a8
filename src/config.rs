//! Runtime configuration.
//!
//! Sources, later ones winning: `catalog.toml` in the working directory if it
//! exists, an explicit file if given, then `CATALOG__*` environment variables
//! (`CATALOG__BASE_URL`, `CATALOG__PAGE_SIZE`, ...).

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_CONFIG_BASENAME: &str = "catalog";
const ENV_PREFIX: &str = "CATALOG";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CACHE_CAPACITY: usize = 64;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_CHANNEL_BUFFER: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Root of the catalog API, without a trailing slash.
    pub base_url: String,
    pub page_size: u32,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    pub request_timeout: Duration,
    /// Capacity of the store's request channel.
    pub channel_buffer: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: crate::model::DEFAULT_PAGE_SIZE,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Loads the configuration from the default file, `path` and the environment.
pub fn load(path: Option<&Path>) -> Result<CatalogConfig, LoadError> {
    let mut builder =
        Config::builder().add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false));

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    from_config(builder.build()?)
}

fn from_config(config: Config) -> Result<CatalogConfig, LoadError> {
    let raw: RawCatalogConfig = config.try_deserialize()?;
    CatalogConfig::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCatalogConfig {
    base_url: Option<String>,
    page_size: Option<u32>,
    cache_ttl_secs: Option<u64>,
    cache_capacity: Option<usize>,
    request_timeout_ms: Option<u64>,
    channel_buffer: Option<usize>,
}

impl CatalogConfig {
    fn from_raw(raw: RawCatalogConfig) -> Result<Self, LoadError> {
        let base_url = raw.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = url::Url::parse(&base_url)
            .map_err(|err| LoadError::invalid("base_url", format!("failed to parse: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LoadError::invalid(
                "base_url",
                format!("unsupported scheme `{}`", parsed.scheme()),
            ));
        }

        let page_size = raw.page_size.unwrap_or(crate::model::DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(LoadError::invalid("page_size", "must be greater than zero"));
        }

        let request_timeout_ms = raw.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        if request_timeout_ms == 0 {
            return Err(LoadError::invalid(
                "request_timeout_ms",
                "must be greater than zero",
            ));
        }

        let channel_buffer = raw.channel_buffer.unwrap_or(DEFAULT_CHANNEL_BUFFER);
        if channel_buffer == 0 {
            return Err(LoadError::invalid(
                "channel_buffer",
                "must be greater than zero",
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size,
            cache_ttl: Duration::from_secs(raw.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS)),
            cache_capacity: raw.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY),
            request_timeout: Duration::from_millis(request_timeout_ms),
            channel_buffer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<CatalogConfig, LoadError> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        from_config(config)
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_file_values() {
        let config = from_toml(
            r#"
            base_url = "https://shop.example.com/api/"
            page_size = 24
            cache_ttl_secs = 60
            request_timeout_ms = 2500
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://shop.example.com/api");
        assert_eq!(config.page_size, 24);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let err = from_toml("page_size = 0").unwrap_err();
        assert!(matches!(err, LoadError::Invalid { key: "page_size", .. }));
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        let err = from_toml(r#"base_url = "ftp://files.example.com""#).unwrap_err();
        assert!(matches!(err, LoadError::Invalid { key: "base_url", .. }));

        let err = from_toml(r#"base_url = "not a url""#).unwrap_err();
        assert!(matches!(err, LoadError::Invalid { key: "base_url", .. }));
    }

    #[test]
    fn test_wrong_type_is_a_build_error() {
        let err = from_toml(r#"page_size = "many""#).unwrap_err();
        assert!(matches!(err, LoadError::Build(_)));
    }
}
