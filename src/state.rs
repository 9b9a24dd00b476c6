use std::collections::BTreeMap;

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::acoustics::positions::PositionCatalog;
use crate::data::frequency_csv::parse_frequency_response_csv;
use crate::data::model::{FrequencyResponseRecord, SmaartMeasurementBundle};
use crate::data::smaart_log::parse_smaart_log;

// ---------------------------------------------------------------------------
// Panel configuration
// ---------------------------------------------------------------------------

/// Absorber panel thicknesses offered by the treatment simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PanelThickness {
    #[serde(rename = "2_inch")]
    TwoInch,
    #[serde(rename = "3_inch")]
    ThreeInch,
    #[serde(rename = "5_5_inch")]
    FiveAndHalfInch,
    #[serde(rename = "11_inch")]
    ElevenInch,
}

/// Panel count per thickness.
pub type PanelConfig = BTreeMap<PanelThickness, u32>;

pub fn default_panel_config() -> PanelConfig {
    BTreeMap::from([
        (PanelThickness::TwoInch, 3),
        (PanelThickness::ThreeInch, 6),
        (PanelThickness::FiveAndHalfInch, 12),
        (PanelThickness::ElevenInch, 4),
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[serde(rename = "2D")]
    TwoD,
    #[serde(rename = "3D")]
    ThreeD,
}

// ---------------------------------------------------------------------------
// Analysis state
// ---------------------------------------------------------------------------

/// Everything the dashboard keeps between renders, independent of rendering.
pub struct AnalysisState {
    pub selected_room: String,
    pub selected_position: String,
    pub panel_config: PanelConfig,
    pub drape_removal: bool,
    pub view_mode: ViewMode,
    pub show_modal_analysis: bool,
    pub comparison_mode: bool,

    /// Parsed CSV export (empty until loaded).
    pub raw_frequency_data: Vec<FrequencyResponseRecord>,

    /// Parsed Smaart log (None until loaded).
    pub smaart: Option<SmaartMeasurementBundle>,

    /// Fetch/load failure shown to the user.
    pub error: Option<String>,

    /// Whether a load is in progress.
    pub loading: bool,
}

impl Default for AnalysisState {
    fn default() -> Self {
        Self {
            selected_room: "Studio 8".to_string(),
            selected_position: "Host C (Talent)".to_string(),
            panel_config: default_panel_config(),
            drape_removal: true,
            view_mode: ViewMode::ThreeD,
            show_modal_analysis: false,
            comparison_mode: false,
            raw_frequency_data: Vec::new(),
            smaart: None,
            error: None,
            loading: false,
        }
    }
}

impl AnalysisState {
    pub fn set_selected_room(&mut self, room: &str) {
        self.selected_room = room.to_string();
    }

    pub fn set_selected_position(&mut self, position: &str) {
        self.selected_position = position.to_string();
    }

    pub fn set_panel_count(&mut self, thickness: PanelThickness, count: u32) {
        self.panel_config.insert(thickness, count);
    }

    pub fn total_panels(&self) -> u32 {
        self.panel_config.values().sum()
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::TwoD => ViewMode::ThreeD,
            ViewMode::ThreeD => ViewMode::TwoD,
        };
    }

    /// Mark a load as started. Data from earlier loads stays visible.
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Ingest fetched CSV text and clear any previous error.
    pub fn ingest_csv(&mut self, text: &str) {
        self.raw_frequency_data = parse_frequency_response_csv(text);
        info!("Stored {} frequency response records", self.raw_frequency_data.len());
        self.error = None;
        self.loading = false;
    }

    /// Ingest fetched Smaart log text and clear any previous error.
    pub fn ingest_log(&mut self, text: &str) {
        let bundle = parse_smaart_log(text);
        info!("Stored Smaart data: {bundle}");
        self.smaart = Some(bundle);
        self.error = None;
        self.loading = false;
    }

    /// Record a fetch failure; previously loaded data is kept.
    pub fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("Measurement load failed: {message}");
        self.error = Some(message);
        self.loading = false;
    }

    /// Measured average STI, or the selected position's catalog STI when the
    /// log had none.
    pub fn current_sti(&self, catalog: &PositionCatalog) -> Option<f64> {
        match &self.smaart {
            Some(bundle) if bundle.average_sti > 0.0 => Some(bundle.average_sti),
            _ => catalog.get(&self.selected_position).map(|p| p.sti),
        }
    }
}
