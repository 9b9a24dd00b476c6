use serde::{Deserialize, Serialize};

/// Problems found while assembling a [`PositionCatalog`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("position catalog is empty")]
    Empty,
    #[error("reference position '{0}' is not in the catalog")]
    UnknownReference(String),
    #[error("position '{0}' appears more than once")]
    DuplicateName(String),
    #[error("position '{name}' has STI {sti}, expected a value in (0, 1]")]
    InvalidSti { name: String, sti: f64 },
    #[error("position '{name}' has STI {sti} above the reference STI {reference}")]
    AboveReference { name: String, sti: f64, reference: f64 },
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Catalog input: a named position before degradation is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSpec {
    pub name: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub sti: f64,
}

impl PositionSpec {
    fn new(name: &str, label: &str, (x, y, z): (f64, f64, f64), sti: f64) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            x,
            y,
            z,
            sti,
        }
    }
}

/// One measurement position, coordinates in feet.
///
/// `x` runs along the room's length, `y` along its width and `z` is height
/// above the floor. `degradation` is the fractional STI loss relative to the
/// catalog's reference position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub sti: f64,
    pub degradation: f64,
    pub label: String,
}

// ---------------------------------------------------------------------------
// PositionCatalog
// ---------------------------------------------------------------------------

/// Read-only, ordered table of measurement positions keyed by name, with one
/// designated reference entry (degradation 0).
#[derive(Debug, Clone, PartialEq)]
pub struct PositionCatalog {
    entries: Vec<(String, MeasurementPosition)>,
    reference: usize,
}

impl PositionCatalog {
    /// Validate the specs and derive each entry's degradation from the
    /// reference position's STI.
    pub fn new(reference: &str, specs: Vec<PositionSpec>) -> Result<Self, CatalogError> {
        if specs.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, spec) in specs.iter().enumerate() {
            if specs[..i].iter().any(|s| s.name == spec.name) {
                return Err(CatalogError::DuplicateName(spec.name.clone()));
            }
            if !(spec.sti > 0.0 && spec.sti <= 1.0) {
                return Err(CatalogError::InvalidSti {
                    name: spec.name.clone(),
                    sti: spec.sti,
                });
            }
        }
        let ref_idx = specs
            .iter()
            .position(|s| s.name == reference)
            .ok_or_else(|| CatalogError::UnknownReference(reference.to_string()))?;

        let ref_sti = specs[ref_idx].sti;
        if let Some(above) = specs.iter().find(|s| s.sti > ref_sti) {
            return Err(CatalogError::AboveReference {
                name: above.name.clone(),
                sti: above.sti,
                reference: ref_sti,
            });
        }

        Ok(Self::assemble(ref_idx, specs))
    }

    fn assemble(reference: usize, specs: Vec<PositionSpec>) -> Self {
        let ref_sti = specs[reference].sti;
        let entries = specs
            .into_iter()
            .map(|s| {
                let position = MeasurementPosition {
                    x: s.x,
                    y: s.y,
                    z: s.z,
                    sti: s.sti,
                    degradation: (ref_sti - s.sti) / ref_sti,
                    label: s.label,
                };
                (s.name, position)
            })
            .collect();
        Self { entries, reference }
    }

    /// The six Studio 8 positions, referenced to Host A (STI 0.95).
    pub fn studio_8() -> Self {
        Self::assemble(0, studio_8_specs())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MeasurementPosition)> {
        self.entries.iter().map(|(name, pos)| (name.as_str(), pos))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&MeasurementPosition> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, pos)| pos)
    }

    pub fn reference_name(&self) -> &str {
        &self.entries[self.reference].0
    }

    pub fn reference(&self) -> &MeasurementPosition {
        &self.entries[self.reference].1
    }

    pub fn is_reference(&self, name: &str) -> bool {
        self.reference_name() == name
    }
}

impl Default for PositionCatalog {
    fn default() -> Self {
        Self::studio_8()
    }
}

/// Name of the Studio 8 reference position.
pub const STUDIO_8_REFERENCE: &str = "Host A (Reference)";

pub fn studio_8_specs() -> Vec<PositionSpec> {
    vec![
        PositionSpec::new(STUDIO_8_REFERENCE, "Host A", (1.0, 0.33, 4.0), 0.95),
        PositionSpec::new("Host C (Talent)", "Host C", (11.0, 5.3, 4.0), 0.67),
        PositionSpec::new("Mid Room", "Mid Room", (6.15, 5.3, 4.0), 0.71),
        PositionSpec::new("NE Corner", "NE Corner", (11.0, 0.5, 4.0), 0.58),
        PositionSpec::new("SE Corner", "SE Corner", (11.0, 10.0, 4.0), 0.62),
        PositionSpec::new("Ceiling", "Ceiling", (6.15, 5.3, 7.5), 0.64),
    ]
}
