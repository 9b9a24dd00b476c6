use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::acoustics::positions::{
    studio_8_specs, CatalogError, PositionCatalog, PositionSpec, STUDIO_8_REFERENCE,
};
use crate::acoustics::room::Room;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("room '{0}' has non-positive or non-finite dimensions")]
    InvalidRoom(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Catalog section of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Name of the position every other STI is compared against.
    pub reference: String,
    pub positions: Vec<PositionSpec>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            reference: STUDIO_8_REFERENCE.to_string(),
            positions: studio_8_specs(),
        }
    }
}

/// Room and measurement positions the analysis runs against.
///
/// ```json
/// {
///   "room": { "name": "Studio 8",
///             "dimensions": { "length": 12.3, "width": 10.6, "height": 8.2 } },
///   "catalog": { "reference": "Host A (Reference)",
///                "positions": [ { "name": "...", "label": "...",
///                                 "x": 1.0, "y": 0.33, "z": 4.0, "sti": 0.95 } ] }
/// }
/// ```
/// Either section may be omitted and falls back to Studio 8.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub room: Room,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AnalysisConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        if !config.room.dimensions.is_valid() {
            return Err(ConfigError::InvalidRoom(config.room.name.clone()));
        }
        Ok(config)
    }

    /// Validate the catalog section and derive degradations.
    pub fn build_catalog(&self) -> Result<PositionCatalog, ConfigError> {
        let catalog = PositionCatalog::new(&self.catalog.reference, self.catalog.positions.clone())?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_is_studio_8() {
        let config = AnalysisConfig::default();
        assert_eq!(config.room.name, "Studio 8");
        assert_eq!(config.build_catalog().unwrap(), PositionCatalog::studio_8());
    }

    #[test]
    fn empty_object_falls_back_to_defaults() {
        let config = AnalysisConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn loads_custom_room_and_catalog_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hub.json");
        fs::write(
            &path,
            r#"{
                "room": { "name": "The Hub",
                          "dimensions": { "length": 20.0, "width": 15.0, "height": 9.0 } },
                "catalog": { "reference": "Desk",
                             "positions": [
                                 { "name": "Desk", "label": "Desk", "x": 2, "y": 2, "z": 4, "sti": 0.9 },
                                 { "name": "Back Corner", "label": "Back", "x": 19, "y": 14, "z": 4, "sti": 0.6 }
                             ] }
            }"#,
        )
        .unwrap();

        let config = AnalysisConfig::from_path(&path).unwrap();
        assert_eq!(config.room.name, "The Hub");
        assert_eq!(config.room.volume_cu_ft, None);
        assert_eq!(config.room.volume(), 20.0 * 15.0 * 9.0);

        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.reference_name(), "Desk");
        assert!((catalog.get("Back Corner").unwrap().degradation - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_dimensions() {
        let err = AnalysisConfig::from_json_str(
            r#"{ "room": { "name": "Flat", "dimensions": { "length": 10, "width": 0, "height": 8 } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRoom(name) if name == "Flat"));
    }

    #[test]
    fn rejects_unknown_reference() {
        let mut config = AnalysisConfig::default();
        config.catalog.reference = "Nowhere".into();
        assert!(matches!(
            config.build_catalog(),
            Err(ConfigError::Catalog(CatalogError::UnknownReference(_)))
        ));
    }

    #[test]
    fn reports_malformed_json_and_missing_files() {
        assert!(matches!(
            AnalysisConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        let temp_dir = TempDir::new().unwrap();
        let err = AnalysisConfig::from_path(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}
