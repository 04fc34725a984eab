//! # Kebunmap
//!
//! Core engine for an interactive plantation-GIS map client.
//!
//! The crate tracks a catalog of selectable WMS overlay layers, converts map
//! clicks into `GetFeatureInfo` queries against the topmost active layer,
//! projects the returned GeoJSON features into a table with an
//! overflow/expand mechanism, and derives a follow-up statistics request
//! keyed by plantation block identifiers. Tile compositing, pan/zoom gesture
//! handling and all presentational chrome live in external collaborators;
//! this crate only consumes their notifications and issues commands back.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod query;

// Re-export public API
pub use crate::core::{
    config::MapConfig,
    geo::{LatLng, LatLngBounds},
    viewport::Viewport,
};

pub use crate::data::geojson::{Feature, FeatureCollection};

pub use crate::input::events::{MapCommand, MapEvent};

pub use crate::layers::{
    registry::{Layer, LayerRegistry},
    style::LayerStyle,
};

pub use crate::query::{
    normalize::{normalize, TableProjection},
    orchestrator::{QueryOrchestrator, QueryState},
    request::{build_feature_info_request, FeatureInfoRequest},
    stats::{derive_statistics_request, StatisticsRequest, StatisticsResult},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("layer error: {0}")]
    Layer(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Error type alias for convenience
pub type Error = MapError;
