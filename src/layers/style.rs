use serde::{Deserialize, Serialize};

/// Opaque render style handed to the map widget together with a layer.
///
/// The query engine never interprets these values; they ride along so the
/// widget can draw overlays consistently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub fill: Option<String>,
    pub fill_opacity: Option<f64>,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            stroke: Some("#3388ff".to_string()),
            stroke_width: Some(3.0),
            fill: Some("#3388ff".to_string()),
            fill_opacity: Some(0.2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = LayerStyle::default();
        assert_eq!(style.stroke.as_deref(), Some("#3388ff"));
        assert_eq!(style.fill_opacity, Some(0.2));
    }
}
