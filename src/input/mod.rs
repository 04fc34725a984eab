pub mod events;

pub use events::{MapCommand, MapEvent};
