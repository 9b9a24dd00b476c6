use std::collections::BTreeSet;

use super::model::FrequencyResponseRecord;
use crate::acoustics::frequency_response::FrequencyPoint;

// ---------------------------------------------------------------------------
// Frequency range
// ---------------------------------------------------------------------------

/// Keep points with `lo <= frequency <= hi`, in order.
pub fn filter_by_frequency_range(points: &[FrequencyPoint], lo: f64, hi: f64) -> Vec<FrequencyPoint> {
    points
        .iter()
        .filter(|p| p.frequency >= lo && p.frequency <= hi)
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Position selection
// ---------------------------------------------------------------------------

/// Distinct `position` tags present in the records, sorted.
pub fn record_positions(records: &[FrequencyResponseRecord]) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(|r| r.position.clone())
        .collect()
}

/// Return indices of records tagged with `position`.
///
/// Records with no position column never match.
pub fn records_for_position(records: &[FrequencyResponseRecord], position: &str) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.position.as_deref() == Some(position))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acoustics::frequency_response::synthesize_frequency_response;
    use crate::acoustics::positions::PositionCatalog;
    use crate::data::frequency_csv::parse_frequency_response_csv;

    #[test]
    fn range_is_inclusive() {
        let points = synthesize_frequency_response(&PositionCatalog::studio_8());
        let mid = filter_by_frequency_range(&points, 500.0, 2000.0);
        let freqs: Vec<f64> = mid.iter().map(|p| p.frequency).collect();
        assert_eq!(freqs, vec![500.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0]);
    }

    #[test]
    fn full_range_keeps_everything() {
        let points = synthesize_frequency_response(&PositionCatalog::studio_8());
        assert_eq!(filter_by_frequency_range(&points, 20.0, 20000.0).len(), 31);
        assert!(filter_by_frequency_range(&points, 21.0, 24.0).is_empty());
    }

    #[test]
    fn selects_records_by_position() {
        let records = parse_frequency_response_csv(
            "Frequency_Hz,position\n100,Host A\n200,Mid Room\n300,Host A\n400,",
        );
        assert_eq!(records_for_position(&records, "Host A"), vec![0, 2]);
        assert!(records_for_position(&records, "Ceiling").is_empty());

        let positions = record_positions(&records);
        assert_eq!(positions.len(), 3);
        assert!(positions.contains(""));
    }

    #[test]
    fn untagged_records_never_match() {
        let records = parse_frequency_response_csv("Frequency_Hz\n100\n200");
        assert!(records_for_position(&records, "").is_empty());
        assert!(record_positions(&records).is_empty());
    }
}
