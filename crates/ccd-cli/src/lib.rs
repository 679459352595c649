//! CLI library components for CCD narrative table extraction.

pub mod logging;
pub mod render;
