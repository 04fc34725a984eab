//! Statistics request derivation and result types
//!
//! After a successful feature query the engine asks the statistics API for
//! aggregates keyed by plantation block. The keys come out of the returned
//! features themselves.

use crate::data::geojson::{property_display, FeatureCollection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Property keys that may carry the block identifier, in priority order
pub const BLOCK_KEYS: [&str; 3] = ["blok", "blok_1", "blok_2"];

/// Payload POSTed to the statistics API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRequest {
    pub blok: Vec<String>,
}

/// Keyed aggregates returned by the statistics API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub status: String,
    #[serde(default)]
    pub data: HashMap<String, f64>,
}

impl StatisticsResult {
    /// Only successful results are ever displayed
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Extracts the aggregation keys for a statistics request from the features
/// of a query response.
///
/// Per feature the first non-absent key of `BLOCK_KEYS` wins; collected
/// values keep first-seen order and duplicates are dropped. Returns `None`
/// when no feature carries a block identifier, which tells the orchestrator
/// to clear prior statistics instead of issuing a request.
pub fn derive_statistics_request(collection: &FeatureCollection) -> Option<StatisticsRequest> {
    let mut blocks: Vec<String> = Vec::new();
    for feature in &collection.features {
        let block = BLOCK_KEYS
            .iter()
            .find_map(|key| feature.property(key).and_then(property_display));
        if let Some(block) = block {
            if !blocks.contains(&block) {
                blocks.push(block);
            }
        }
    }

    if blocks.is_empty() {
        None
    } else {
        Some(StatisticsRequest { blok: blocks })
    }
}
