pub mod geojson;

pub use geojson::{property_display, Feature, FeatureCollection};
