//! Room-acoustics measurement parsing and analysis.
//!
//! The [`data`] layer turns measurement exports (frequency-response CSV,
//! Smaart logs) into typed records without ever failing on bad input. The
//! [`acoustics`] layer derives room modes, synthetic response curves and
//! degradation heatmaps from room geometry and a [`PositionCatalog`].

pub mod acoustics;
pub mod color;
pub mod config;
pub mod data;
pub mod state;

pub use acoustics::positions::PositionCatalog;
pub use config::AnalysisConfig;
