pub mod registry;
pub mod style;

pub use registry::{Layer, LayerRegistry, BASE_LAYER};
pub use style::LayerStyle;
