use std::collections::BTreeMap;

use serde::Serialize;

/// ITU-R BS.1116 reverberation target for critical listening rooms, seconds.
pub const RT60_TARGET_S: f64 = 0.3;

/// One band of a before/after treatment comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rt60Band {
    pub frequency: u32,
    pub current: f64,
    pub predicted: Option<f64>,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rt60Comparison {
    pub bands: Vec<Rt60Band>,
    pub average_current: Option<f64>,
    pub average_predicted: Option<f64>,
    /// Relative reduction of the average RT60, percent.
    pub improvement_percent: Option<f64>,
}

/// Compare measured RT60 with a predicted (treated) set, band by band over
/// the bands present in `current`.
pub fn compare_rt60(current: &BTreeMap<u32, f64>, predicted: &BTreeMap<u32, f64>) -> Rt60Comparison {
    let bands: Vec<Rt60Band> = current
        .iter()
        .map(|(&frequency, &rt60)| Rt60Band {
            frequency,
            current: rt60,
            predicted: predicted.get(&frequency).copied(),
            target: RT60_TARGET_S,
        })
        .collect();

    let average_current = mean(current.values().copied());
    let average_predicted = mean(predicted.values().copied());
    let improvement_percent = match (average_current, average_predicted) {
        (Some(cur), Some(pred)) if cur != 0.0 => Some((cur - pred) / cur * 100.0),
        _ => None,
    };

    Rt60Comparison {
        bands,
        average_current,
        average_predicted,
        improvement_percent,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands(pairs: &[(u32, f64)]) -> BTreeMap<u32, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn averages_and_improvement() {
        let current = bands(&[(125, 0.8), (250, 0.6)]);
        let predicted = bands(&[(125, 0.4), (250, 0.3)]);
        let cmp = compare_rt60(&current, &predicted);
        assert_eq!(cmp.bands.len(), 2);
        assert!((cmp.average_current.unwrap() - 0.7).abs() < 1e-12);
        assert!((cmp.average_predicted.unwrap() - 0.35).abs() < 1e-12);
        assert!((cmp.improvement_percent.unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn rows_follow_current_bands() {
        let current = bands(&[(500, 0.78), (125, 0.85)]);
        let predicted = bands(&[(125, 0.5), (8000, 0.2)]);
        let cmp = compare_rt60(&current, &predicted);
        assert_eq!(cmp.bands[0].frequency, 125);
        assert_eq!(cmp.bands[0].predicted, Some(0.5));
        assert_eq!(cmp.bands[1].predicted, None);
        assert_eq!(cmp.bands[1].target, 0.3);
    }

    #[test]
    fn empty_sets_have_no_summary() {
        let cmp = compare_rt60(&BTreeMap::new(), &BTreeMap::new());
        assert!(cmp.bands.is_empty());
        assert_eq!(cmp.average_current, None);
        assert_eq!(cmp.improvement_percent, None);
    }
}
