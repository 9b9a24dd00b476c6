//! Derived metrics: room geometry, the position catalog and everything
//! computed from them.
//!
//! ```text
//!   units ──► room ──► room_modes
//!
//!   positions ──┬──► frequency_response
//!               └──► heatmap
//!
//!   Smaart bundles ──► rt60
//! ```

pub mod frequency_response;
pub mod heatmap;
pub mod positions;
pub mod room;
pub mod room_modes;
pub mod rt60;
pub mod units;
