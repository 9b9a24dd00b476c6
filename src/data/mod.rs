//! Data layer: measurement records, parsing, loading, filtering and export.
//!
//! Architecture:
//! ```text
//!  .csv                     .txt / .log
//!    │                          │
//!    ▼                          ▼
//!  ┌───────────────┐      ┌────────────┐
//!  │ frequency_csv │      │ smaart_log │   text → records (never fails)
//!  └───────────────┘      └────────────┘
//!    │                          │
//!    ▼                          ▼
//!  Vec<FrequencyResponseRecord>  SmaartMeasurementBundle
//!    │
//!    ▼
//!  ┌──────────┐   ┌──────────┐
//!  │  filter  │   │  export  │   selection / CSV text
//!  └──────────┘   └──────────┘
//! ```
//! `loader` reads files from disk and dispatches to the parsers.

pub mod export;
pub mod filter;
pub mod frequency_csv;
pub mod loader;
pub mod model;
pub mod smaart_log;
