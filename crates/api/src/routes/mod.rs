//! HTTP Routes

pub mod estimate;
pub mod options;
