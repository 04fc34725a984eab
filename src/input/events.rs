use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Notifications the map-rendering collaborator feeds into the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// User clicked the map at a geographic position
    Click { position: LatLng },
    /// The widget finished a zoom gesture at the given level
    ZoomEnd { zoom: u8 },
}

impl MapEvent {
    /// Gets the geographic position associated with this event, if any
    pub fn position(&self) -> Option<LatLng> {
        match self {
            MapEvent::Click { position } => Some(*position),
            MapEvent::ZoomEnd { .. } => None,
        }
    }
}

/// Commands the engine issues back to the rendering collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapCommand {
    /// Apply a new zoom level
    SetZoom { zoom: u8 },
    /// Recenter the view
    SetView { center: LatLng, zoom: u8 },
}
