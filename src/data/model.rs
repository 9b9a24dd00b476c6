use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FrequencyResponseRecord – one row of a measurement CSV export
// ---------------------------------------------------------------------------

/// A single row of a frequency-response CSV export.
///
/// `frequency` is always present; a missing or unparseable cell is stored as
/// `NaN`. Every other field is `None` when its column was not in the header,
/// which is distinct from a cell that was present but did not parse (`Some(NaN)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyResponseRecord {
    /// Hz.
    pub frequency: f64,
    /// dB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    /// Degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<f64>,
    /// 0–1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sti: Option<f64>,
    /// Percent, 0–100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sti_degradation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Hex colour tag, e.g. `#10b981`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Default for FrequencyResponseRecord {
    fn default() -> Self {
        Self {
            frequency: f64::NAN,
            magnitude: None,
            phase: None,
            sti: None,
            sti_degradation: None,
            position: None,
            color: None,
        }
    }
}

// ---------------------------------------------------------------------------
// SmaartMeasurementBundle – parsed vendor log
// ---------------------------------------------------------------------------

/// Octave-band centres the STI row is mapped onto, in column order.
pub const STI_REFERENCE_BANDS: [u32; 7] = [125, 250, 500, 1000, 2000, 4000, 8000];

/// Everything the vendor log parser could extract from one export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmaartMeasurementBundle {
    /// Band centre (Hz) → RT60 (seconds). Only finite values are stored.
    pub rt60_by_freq: BTreeMap<u32, f64>,
    /// Band centre (Hz) → STI (0–1), keyed positionally from [`STI_REFERENCE_BANDS`].
    pub sti_by_freq: BTreeMap<u32, f64>,
    /// First value of the last STI row, 0 when no STI row was seen.
    #[serde(rename = "averageSTI")]
    pub average_sti: f64,
}

impl SmaartMeasurementBundle {
    /// Whether neither detector matched anything.
    pub fn is_empty(&self) -> bool {
        self.rt60_by_freq.is_empty() && self.sti_by_freq.is_empty()
    }

    /// Mean RT60 across all parsed bands.
    pub fn mean_rt60(&self) -> Option<f64> {
        if self.rt60_by_freq.is_empty() {
            return None;
        }
        let sum: f64 = self.rt60_by_freq.values().sum();
        Some(sum / self.rt60_by_freq.len() as f64)
    }
}

impl fmt::Display for SmaartMeasurementBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} RT60 bands, {} STI bands, average STI {:.2}",
            self.rt60_by_freq.len(),
            self.sti_by_freq.len(),
            self.average_sti
        )
    }
}

// ---------------------------------------------------------------------------
// Measurements – whatever the loader produced from one file
// ---------------------------------------------------------------------------

/// Result of loading one measurement file.
#[derive(Debug, Clone)]
pub enum Measurements {
    FrequencyResponse(Vec<FrequencyResponseRecord>),
    Smaart(SmaartMeasurementBundle),
}

impl Measurements {
    pub fn kind(&self) -> &'static str {
        match self {
            Measurements::FrequencyResponse(_) => "frequency response CSV",
            Measurements::Smaart(_) => "Smaart log",
        }
    }
}
