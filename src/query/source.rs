//! HTTP sources for the two query collaborators
//!
//! The orchestrator talks to trait seams so tests can stand in for the
//! network; the implementations here are the real WMS and statistics
//! endpoints over a shared reqwest client.

use crate::data::geojson::FeatureCollection;
use crate::query::request::FeatureInfoRequest;
use crate::query::stats::{StatisticsRequest, StatisticsResult};
use crate::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;

/// Shared async HTTP client. Building it once avoids TLS and connection-pool
/// setup on every query.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent("kebunmap/0.1.0")
        .timeout(std::time::Duration::from_secs(30))
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .pool_max_idle_per_host(8)
        .build()
        .expect("failed to build reqwest async client")
});

/// Anything that can answer a GetFeatureInfo request
#[async_trait]
pub trait FeatureInfoSource: Send + Sync {
    async fn fetch_features(&self, request: &FeatureInfoRequest) -> Result<FeatureCollection>;
}

/// Anything that can answer a statistics aggregation request
#[async_trait]
pub trait StatisticsSource: Send + Sync {
    async fn fetch_statistics(&self, request: &StatisticsRequest) -> Result<StatisticsResult>;
}

/// GetFeatureInfo over HTTP; the target URL is carried by the request itself
pub struct WmsFeatureInfoSource;

#[async_trait]
impl FeatureInfoSource for WmsFeatureInfoSource {
    async fn fetch_features(&self, request: &FeatureInfoRequest) -> Result<FeatureCollection> {
        let url = request.url();
        log::debug!("GetFeatureInfo {}", url);

        let response = HTTP_CLIENT.get(&url).send().await?.error_for_status()?;
        // Decode by hand so a non-JSON body surfaces as a decode error, not
        // a transport error.
        let body = response.text().await?;
        let collection = serde_json::from_str(&body)?;
        Ok(collection)
    }
}

/// Statistics aggregation over HTTP
pub struct HttpStatisticsSource {
    url: String,
}

impl HttpStatisticsSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl StatisticsSource for HttpStatisticsSource {
    async fn fetch_statistics(&self, request: &StatisticsRequest) -> Result<StatisticsResult> {
        log::debug!("statistics request for {} blocks", request.blok.len());

        let response = HTTP_CLIENT
            .post(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        let result = serde_json::from_str(&body)?;
        Ok(result)
    }
}
