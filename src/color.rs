use std::collections::BTreeMap;
use std::fmt;

use palette::{Hsl, IntoColor, Srgb};

use crate::acoustics::positions::PositionCatalog;
use crate::data::model::FrequencyResponseRecord;

// ---------------------------------------------------------------------------
// STI quality
// ---------------------------------------------------------------------------

/// Qualitative STI band for a position, from its degradation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StiQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl StiQuality {
    /// `< 0.15` excellent, `< 0.25` good, `< 0.35` fair, poor otherwise.
    pub fn from_degradation(degradation: f64) -> Self {
        if degradation < 0.15 {
            StiQuality::Excellent
        } else if degradation < 0.25 {
            StiQuality::Good
        } else if degradation < 0.35 {
            StiQuality::Fair
        } else {
            StiQuality::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StiQuality::Excellent => "Excellent",
            StiQuality::Good => "Good",
            StiQuality::Fair => "Fair",
            StiQuality::Poor => "Poor",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            StiQuality::Excellent => "#10b981",
            StiQuality::Good => "#3b82f6",
            StiQuality::Fair => "#f59e0b",
            StiQuality::Poor => "#ef4444",
        }
    }

    pub fn color(self) -> Srgb<u8> {
        parse_color_tag(self.hex()).unwrap_or(Srgb::new(0, 0, 0))
    }
}

impl fmt::Display for StiQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Hex tags and palettes
// ---------------------------------------------------------------------------

/// Parse a `#rrggbb` (or `#rgb`) colour tag.
pub fn parse_color_tag(tag: &str) -> Option<Srgb<u8>> {
    let tag = tag.trim();
    if !tag.starts_with('#') {
        return None;
    }
    tag.parse::<Srgb<u8>>().ok()
}

pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Position colours
// ---------------------------------------------------------------------------

/// Colour per catalog position, used to draw one series per position.
#[derive(Debug, Clone)]
pub struct PositionColors {
    mapping: BTreeMap<String, Srgb<u8>>,
}

impl PositionColors {
    /// Prefer the `Color` tag of the first record whose `position` matches the
    /// catalog name or label; otherwise take the next palette colour.
    pub fn new(catalog: &PositionCatalog, records: &[FrequencyResponseRecord]) -> Self {
        let palette = generate_palette(catalog.len());
        let mapping = catalog
            .iter()
            .zip(palette)
            .map(|((name, pos), fallback)| {
                let tagged = records
                    .iter()
                    .filter(|r| matches!(r.position.as_deref(), Some(p) if p == name || p == pos.label))
                    .find_map(|r| r.color.as_deref().and_then(parse_color_tag));
                (name.to_string(), tagged.unwrap_or(fallback))
            })
            .collect();
        Self { mapping }
    }

    pub fn color_for(&self, position: &str) -> Option<Srgb<u8>> {
        self.mapping.get(position).copied()
    }

    /// Return the legend entries (position → hex colour).
    pub fn legend_entries(&self) -> Vec<(String, String)> {
        self.mapping
            .iter()
            .map(|(name, c)| (name.clone(), to_hex(*c)))
            .collect()
    }
}
