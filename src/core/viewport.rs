use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center and zoom level.
///
/// The viewport mirrors what the external map widget displays. Pan/zoom
/// gestures mutate it through notifications; explicit zoom commands mutate
/// it directly and are echoed back to the widget by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: u8,
    /// The minimum allowed zoom level
    pub min_zoom: u8,
    /// The maximum allowed zoom level
    pub max_zoom: u8,
}

impl Viewport {
    /// Creates a new viewport with the default zoom limits
    pub fn new(center: LatLng, zoom: u8) -> Self {
        let mut viewport = Self {
            center,
            zoom,
            min_zoom: 0,
            max_zoom: 22,
        };
        viewport.zoom = viewport.clamp_zoom(zoom);
        viewport
    }

    /// Sets the center of the viewport
    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = self.clamp_zoom(zoom);
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: u8, max_zoom: u8) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.clamp_zoom(self.zoom);
    }

    /// Increments the zoom level by one step and returns the new level
    pub fn zoom_in(&mut self) -> u8 {
        self.zoom = self.clamp_zoom(self.zoom.saturating_add(1));
        self.zoom
    }

    /// Decrements the zoom level by one step and returns the new level
    pub fn zoom_out(&mut self) -> u8 {
        self.zoom = self.clamp_zoom(self.zoom.saturating_sub(1));
        self.zoom
    }

    fn clamp_zoom(&self, zoom: u8) -> u8 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

impl Default for Viewport {
    /// Initial view over the estate
    fn default() -> Self {
        Self::new(LatLng::new(-1.578, 112.837), 14)
    }
}
