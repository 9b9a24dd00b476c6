use std::f64::consts::PI;

use rand::Rng;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::positions::{MeasurementPosition, PositionCatalog};

/// Third-octave centres from 20 Hz to 20 kHz.
pub const RESPONSE_FREQUENCIES: [f64; 31] = [
    20.0, 25.0, 31.5, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0, 250.0, 315.0, 400.0,
    500.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0, 3150.0, 4000.0, 5000.0, 6300.0,
    8000.0, 10000.0, 12500.0, 16000.0, 20000.0,
];

/// SPL at the reference position before any adjustment, dB.
const BASE_SPL_DB: f64 = 85.0;
/// Peak jitter magnitude, dB.
const JITTER_DB: f64 = 1.0;

// ---------------------------------------------------------------------------
// FrequencyPoint
// ---------------------------------------------------------------------------

/// One grid frequency with a synthesized SPL per catalog position.
///
/// Serializes flat: `{"frequency": 20, "<position>": 93.12, ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyPoint {
    pub frequency: f64,
    /// `(position name, SPL dB)` in catalog order.
    pub levels: Vec<(String, f64)>,
}

impl FrequencyPoint {
    pub fn level(&self, position: &str) -> Option<f64> {
        self.levels
            .iter()
            .find(|(name, _)| name == position)
            .map(|(_, spl)| *spl)
    }
}

impl Serialize for FrequencyPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.levels.len() + 1))?;
        map.serialize_entry("frequency", &self.frequency)?;
        for (name, spl) in &self.levels {
            map.serialize_entry(name, spl)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

/// Synthesize a plausible response curve per position with the thread-local RNG.
/// Successive calls differ by up to ±1 dB per point.
pub fn synthesize_frequency_response(catalog: &PositionCatalog) -> Vec<FrequencyPoint> {
    synthesize_frequency_response_with(catalog, &mut rand::rng())
}

/// Same as [`synthesize_frequency_response`], drawing jitter from `rng`.
pub fn synthesize_frequency_response_with<R: Rng>(
    catalog: &PositionCatalog,
    rng: &mut R,
) -> Vec<FrequencyPoint> {
    RESPONSE_FREQUENCIES
        .iter()
        .map(|&freq| FrequencyPoint {
            frequency: freq,
            levels: catalog
                .iter()
                .map(|(name, pos)| {
                    let jitter = rng.random_range(-JITTER_DB..=JITTER_DB);
                    (name.to_string(), round_hundredth(shaped_spl(freq, pos) + jitter))
                })
                .collect(),
        })
        .collect()
}

/// Empirical SPL at `freq` for a position, without jitter.
///
/// ```text
///   < 200 Hz        room gain    +8·(1+2d)·e^(-f/80)
///   < 500 Hz        modal ripple +6·(1+d)·sin(πf/50)
///   500..=2000 Hz   clarity      -5·d
///   > 4000 Hz       absorption   -0.001·(f-4000)·(1+0.5d)
/// ```
pub fn shaped_spl(freq: f64, pos: &MeasurementPosition) -> f64 {
    let d = pos.degradation;
    let mut spl = BASE_SPL_DB;

    if freq < 200.0 {
        spl += 8.0 * (1.0 + 2.0 * d) * (-freq / 80.0).exp();
    }
    if freq < 500.0 {
        spl += 6.0 * (1.0 + d) * (freq / 50.0 * PI).sin();
    }
    if (500.0..=2000.0).contains(&freq) {
        spl -= 5.0 * d;
    }
    if freq > 4000.0 {
        spl += -0.001 * (freq - 4000.0) * (1.0 + 0.5 * d);
    }
    spl
}

fn round_hundredth(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
