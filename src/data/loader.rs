use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;

use super::frequency_csv::parse_frequency_response_csv;
use super::model::{FrequencyResponseRecord, Measurements, SmaartMeasurementBundle};
use super::smaart_log::parse_smaart_log;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a measurement export from disk.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`          – frequency-response export (`Frequency_Hz,Magnitude_dB,...`)
/// * `.txt` / `.log` – Smaart measurement log (tab-delimited RT60 / STI rows)
///
/// Only reading can fail; the text itself is handed to the parsers, which
/// accept anything.
pub fn load_measurements(path: &Path) -> Result<Measurements> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let measurements = match ext.as_str() {
        "csv" => Measurements::FrequencyResponse(load_frequency_response(path)?),
        "txt" | "log" => Measurements::Smaart(load_smaart_log(path)?),
        other => bail!("Unsupported measurement file extension: .{other}"),
    };
    Ok(measurements)
}

/// Read and parse a frequency-response CSV export.
pub fn load_frequency_response(path: &Path) -> Result<Vec<FrequencyResponseRecord>> {
    let text = read_text(path)?;
    let records = parse_frequency_response_csv(&text);
    info!("Loaded {} frequency response records from {}", records.len(), path.display());
    Ok(records)
}

/// Read and parse a Smaart log export.
pub fn load_smaart_log(path: &Path) -> Result<SmaartMeasurementBundle> {
    let text = read_text(path)?;
    let bundle = parse_smaart_log(&text);
    info!("Loaded Smaart log {}: {bundle}", path.display());
    Ok(bundle)
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
