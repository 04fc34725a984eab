//! WMS GetFeatureInfo request building
//!
//! A click is translated into a fixed-size query window around the clicked
//! point against the single active layer. Building is side-effect free; the
//! orchestrator owns issuing the HTTP call.

use crate::core::geo::{LatLng, LatLngBounds};
use crate::layers::registry::Layer;
use crate::{MapError, Result};
use url::form_urlencoded;

/// Half-width of the query window around a click, in degrees.
///
/// This is a geographic margin, not a ground-resolution computation, so the
/// window's on-screen extent varies with zoom level and latitude.
pub const CLICK_BBOX_MARGIN_DEG: f64 = 0.005;

/// Cap on features a single query may return
pub const FEATURE_COUNT: u32 = 50;

// Fixed sample window: the queried pixel sits at the center of a 101x101
// window spanning the bbox.
const SAMPLE_X: u32 = 50;
const SAMPLE_Y: u32 = 50;
const WINDOW_WIDTH: u32 = 101;
const WINDOW_HEIGHT: u32 = 101;
const SRS: &str = "EPSG:4326";

/// A fully resolved GetFeatureInfo request: base URL plus an ordered WMS
/// parameter set
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureInfoRequest {
    base_url: String,
    params: Vec<(String, String)>,
    bbox: LatLngBounds,
}

impl FeatureInfoRequest {
    /// The parameter set in emission order
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// The query window around the clicked point
    pub fn bbox(&self) -> &LatLngBounds {
        &self.bbox
    }

    /// Percent-encoded query string, parameters in stable declaration order
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// The complete request URL
    pub fn url(&self) -> String {
        format!("{}?{}", self.base_url, self.query_string())
    }
}

/// Builds a GetFeatureInfo request for `point` scoped to `layer`.
///
/// Fails with `MapError::InvalidInput` when no layer is given or the click
/// coordinates are not finite numbers.
pub fn build_feature_info_request(
    base_url: &str,
    point: LatLng,
    layer: Option<&Layer>,
) -> Result<FeatureInfoRequest> {
    let layer = layer.ok_or_else(|| MapError::InvalidInput("no layer to query".to_string()))?;
    if !point.is_finite() {
        return Err(MapError::InvalidInput(format!(
            "click coordinates are not finite: lat={}, lng={}",
            point.lat, point.lng
        )));
    }

    let bbox = point.inflate(CLICK_BBOX_MARGIN_DEG);
    let params: Vec<(String, String)> = [
        ("service", "wms".to_string()),
        ("version", "1.1".to_string()),
        ("request", "GetFeatureInfo".to_string()),
        ("format", "image/png".to_string()),
        ("transparent", "true".to_string()),
        ("query_layers", layer.wms_name.clone()),
        ("layers", layer.wms_name.clone()),
        ("info_format", "application/json".to_string()),
        ("feature_count", FEATURE_COUNT.to_string()),
        ("x", SAMPLE_X.to_string()),
        ("y", SAMPLE_Y.to_string()),
        ("srs", SRS.to_string()),
        ("width", WINDOW_WIDTH.to_string()),
        ("height", WINDOW_HEIGHT.to_string()),
        ("bbox", bbox.to_wms_bbox()),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect();

    Ok(FeatureInfoRequest {
        base_url: base_url.to_string(),
        params,
        bbox,
    })
}
