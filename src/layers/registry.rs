use crate::layers::style::LayerStyle;
use serde::{Deserialize, Serialize};

/// WMS name of the always-on base map. The widget renders it underneath the
/// overlays; it never joins the query registry.
pub const BASE_LAYER: &str = "ehp:ehp_base";

/// A selectable WMS overlay layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Unique catalog id
    pub id: String,
    /// Human-readable title shown in the layer toolbox and above the table
    pub title: String,
    /// Workspace-qualified WMS layer name, e.g. "ehp:pg_block"
    pub wms_name: String,
    /// Whether the widget currently renders this layer
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<LayerStyle>,
}

impl Layer {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        wms_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            wms_name: wms_name.into(),
            visible: false,
            style: None,
        }
    }

    /// Sets the initial visibility flag
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Attaches a render style
    pub fn with_style(mut self, style: LayerStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// Static catalog of overlay layers.
///
/// Registry order is stable for the process lifetime and doubles as the
/// priority order for resolving which layer answers feature queries: the
/// first visible layer wins, however many others are shown.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
}

impl LayerRegistry {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// All layers in registry order
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Updates a layer's visibility flag; unknown ids are a silent no-op
    pub fn set_visible(&mut self, layer_id: &str, visible: bool) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.id == layer_id) {
            layer.visible = visible;
        }
    }

    /// The layer that answers feature queries: first visible in registry order
    pub fn active_layer(&self) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.visible)
    }

    /// Layers the widget should currently render, in registry order
    pub fn visible_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|layer| layer.visible)
    }

    /// First layer whose WMS name contains `code` as a substring.
    ///
    /// Used to attribute query results to a layer from the feature-id prefix.
    pub fn find_by_code(&self, code: &str) -> Option<&Layer> {
        if code.is_empty() {
            return None;
        }
        self.layers
            .iter()
            .find(|layer| layer.wms_name.contains(code))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerRegistry {
    /// The estate catalog the client ships with
    fn default() -> Self {
        Self::new(vec![
            Layer::new("block", "Block", "ehp:pg_block").visible(true),
            Layer::new("planted", "Planted", "ehp:pg_landuse"),
            Layer::new("sawit", "Sawit", "ehp:pg_sawit"),
            Layer::new("jalan", "Jalan", "ehp:pg_road"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_layer_is_first_visible() {
        let mut registry = LayerRegistry::default();
        assert_eq!(registry.active_layer().unwrap().id, "block");

        // A later layer becoming visible does not displace an earlier one
        registry.set_visible("sawit", true);
        assert_eq!(registry.active_layer().unwrap().id, "block");

        registry.set_visible("block", false);
        assert_eq!(registry.active_layer().unwrap().id, "sawit");
    }

    #[test]
    fn test_no_visible_layer() {
        let mut registry = LayerRegistry::default();
        for id in ["block", "planted", "sawit", "jalan"] {
            registry.set_visible(id, false);
        }
        assert!(registry.active_layer().is_none());
    }

    #[test]
    fn test_unknown_layer_is_noop() {
        let mut registry = LayerRegistry::default();
        let before = registry.clone();
        registry.set_visible("missing", true);
        assert_eq!(registry, before);
    }

    #[test]
    fn test_toggle_round_trip_is_idempotent() {
        let mut registry = LayerRegistry::default();
        let before = registry.clone();
        registry.set_visible("planted", true);
        registry.set_visible("planted", false);
        assert_eq!(registry, before);
    }

    #[test]
    fn test_find_by_code() {
        let registry = LayerRegistry::default();
        assert_eq!(registry.find_by_code("pg_block").unwrap().id, "block");
        assert_eq!(registry.find_by_code("pg_road").unwrap().id, "jalan");
        assert!(registry.find_by_code("pg_missing").is_none());
        assert!(registry.find_by_code("").is_none());
    }
}
