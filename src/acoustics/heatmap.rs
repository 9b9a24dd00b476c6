use serde::Serialize;

use super::positions::PositionCatalog;

/// Octave bands on the heatmap's frequency axis.
pub const HEATMAP_BANDS: [u32; 8] = [63, 125, 250, 500, 1000, 2000, 4000, 8000];

/// One position × band sample of STI degradation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub position: String,
    pub frequency: u32,
    /// Fraction of reference STI lost, capped at 1.
    pub degradation: f64,
}

/// Cross every catalog position with [`HEATMAP_BANDS`], position-major.
///
/// Starts from the position's catalog degradation, then:
/// * bands below 250 Hz at positions named `*Corner*` ×1.4 (modal build-up)
/// * bands 500–2000 Hz at the reference position ×0.5
/// * bands above 2000 Hz at `Ceiling` ×1.2 (drape absorption)
pub fn build_degradation_heatmap(catalog: &PositionCatalog) -> Vec<HeatmapCell> {
    catalog
        .iter()
        .flat_map(|(name, pos)| {
            let is_reference = catalog.is_reference(name);
            HEATMAP_BANDS.iter().map(move |&band| {
                let mut degradation = pos.degradation;
                if band < 250 && name.contains("Corner") {
                    degradation *= 1.4;
                }
                if (500..=2000).contains(&band) && is_reference {
                    degradation *= 0.5;
                }
                if band > 2000 && name == "Ceiling" {
                    degradation *= 1.2;
                }
                HeatmapCell {
                    position: name.to_string(),
                    frequency: band,
                    degradation: degradation.min(1.0),
                }
            })
        })
        .collect()
}
