use std::collections::BTreeMap;

use log::debug;

use super::model::{SmaartMeasurementBundle, STI_REFERENCE_BANDS};

/// Parse a Smaart measurement log export.
///
/// Two independent detectors run over every line:
///
/// ```text
///  Oct  125Hz  0.85  0.82  0.88     RT60 row  → rt60_by_freq[125] = 0.85
///  STI  0.94   0.99  0.97  ...      STI row   → sti_by_freq[125] = 0.94, ...
/// ```
///
/// Anything else (titles, dates, section banners, column headers, broken rows)
/// is skipped. An STI row replaces the previous STI result entirely.
pub fn parse_smaart_log(text: &str) -> SmaartMeasurementBundle {
    let mut bundle = SmaartMeasurementBundle::default();

    for (line_no, line) in text.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        if let Some((band, rt60)) = parse_rt60_row(&tokens) {
            bundle.rt60_by_freq.insert(band, rt60);
        } else if tokens.len() >= 3 && tokens[1].ends_with("Hz") {
            debug!("line {}: skipping malformed RT60 row {:?}", line_no + 1, line);
        }

        if let Some((sti_by_freq, average)) = parse_sti_row(&tokens) {
            if !bundle.sti_by_freq.is_empty() {
                debug!("line {}: STI row replaces earlier STI values", line_no + 1);
            }
            bundle.sti_by_freq = sti_by_freq;
            bundle.average_sti = average;
        }
    }

    debug!("parsed Smaart log: {bundle}");
    bundle
}

/// `<word> <N>Hz <rt60> ...` → `(N, rt60)`.
fn parse_rt60_row(tokens: &[&str]) -> Option<(u32, f64)> {
    let [label, band, rt60, ..] = tokens else {
        return None;
    };
    if !is_word(label) {
        return None;
    }
    let band: u32 = band.strip_suffix("Hz")?.parse().ok()?;
    let rt60 = parse_finite(rt60)?;
    Some((band, rt60))
}

/// `STI <v1> <v2> ...` → positional map onto the reference bands, plus the
/// first value as the average. A value that does not parse leaves its band
/// absent; values past the seventh are ignored.
fn parse_sti_row(tokens: &[&str]) -> Option<(BTreeMap<u32, f64>, f64)> {
    let [keyword, first, ..] = tokens else {
        return None;
    };
    if *keyword != "STI" {
        return None;
    }
    let average = parse_finite(first)?;

    let sti_by_freq = STI_REFERENCE_BANDS
        .iter()
        .zip(&tokens[1..])
        .filter_map(|(&band, tok)| parse_finite(tok).map(|v| (band, v)))
        .collect();
    Some((sti_by_freq, average))
}

fn is_word(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
