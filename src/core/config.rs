//! Endpoint configuration for the map client
//!
//! Both collaborator URLs are read once at startup and stay immutable for
//! the process lifetime.

use crate::{MapError, Result};
use std::env;
use std::time::Duration;

/// Environment variable holding the WMS server base URL
pub const WMS_URL_ENV: &str = "KEBUNMAP_WMS_URL";
/// Environment variable holding the statistics API endpoint
pub const STATS_URL_ENV: &str = "KEBUNMAP_STATS_URL";

/// Immutable endpoint configuration for the two HTTP collaborators
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Base URL of the WMS server (GetMap tiles and GetFeatureInfo queries)
    pub wms_url: String,
    /// Statistics aggregation API endpoint
    pub stats_url: String,
    /// Bound applied to each HTTP round-trip before the query is marked failed
    pub request_timeout: Duration,
}

impl MapConfig {
    /// Creates a configuration with the default request timeout
    pub fn new(wms_url: impl Into<String>, stats_url: impl Into<String>) -> Self {
        Self {
            wms_url: wms_url.into(),
            stats_url: stats_url.into(),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Overrides the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        let wms_url = env::var(WMS_URL_ENV)
            .map_err(|_| MapError::Config(format!("{} is not set", WMS_URL_ENV)))?;
        let stats_url = env::var(STATS_URL_ENV)
            .map_err(|_| MapError::Config(format!("{} is not set", STATS_URL_ENV)))?;
        Ok(Self::new(wms_url, stats_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MapConfig::new("http://wms.example/geoserver", "http://api.example/stats");
        assert_eq!(config.wms_url, "http://wms.example/geoserver");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_timeout_override() {
        let config = MapConfig::new("http://wms.example", "http://api.example")
            .with_timeout(Duration::from_millis(500));
        assert_eq!(config.request_timeout, Duration::from_millis(500));
    }
}
