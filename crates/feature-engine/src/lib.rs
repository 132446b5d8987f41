//! Feature Engineering Engine
//!
//! Turns a property selection into the dense, schema-aligned feature vector
//! the price model expects.

mod encoder;
mod features;
mod selection;

pub use encoder::FeatureEncoder;
pub use features::FeatureVector;
pub use selection::UserSelection;
