use std::fmt;

use serde::Serialize;

use super::room::RoomDimensions;
use super::units::SPEED_OF_SOUND_FT_S;

/// Modes above this frequency (after rounding) are dropped.
pub const MAX_MODE_FREQUENCY_HZ: f64 = 500.0;

/// Number of harmonics evaluated per axis.
const AXIAL_HARMONICS: u32 = 3;

/// Low-order tangential modes that tend to cause the most trouble, as
/// `(nL, nW, nH, label)`.
const TANGENTIAL_MODES: [(u32, u32, u32, &str); 5] = [
    (1, 1, 0, "1L-1W"),
    (1, 0, 1, "1L-1H"),
    (0, 1, 1, "1W-1H"),
    (2, 1, 0, "2L-1W"),
    (1, 2, 0, "1L-2W"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    Axial,
    Tangential,
    /// Mode involving all three axes. Not computed.
    Oblique,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModeKind::Axial => "axial",
            ModeKind::Tangential => "tangential",
            ModeKind::Oblique => "oblique",
        };
        f.write_str(s)
    }
}

/// One resonance of a rectangular room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomMode {
    /// Hz, rounded to one decimal.
    pub frequency: f64,
    #[serde(rename = "type")]
    pub kind: ModeKind,
    /// `Length`/`Width`/`Height` for axial modes, the index label otherwise.
    pub axis: String,
    pub label: String,
}

/// Axial (3 harmonics per axis) and curated tangential modes of a room,
/// sorted ascending by frequency and limited to 500 Hz.
///
/// f = (c/2) · sqrt((nL/L)² + (nW/W)² + (nH/H)²), c = 1130 ft/s.
/// Oblique modes are not computed.
pub fn compute_room_modes(dims: &RoomDimensions) -> Vec<RoomMode> {
    let axes = [
        (dims.length, "Length", 'L'),
        (dims.width, "Width", 'W'),
        (dims.height, "Height", 'H'),
    ];

    let axial = axes.iter().flat_map(|&(dim, axis, short)| {
        (1..=AXIAL_HARMONICS).map(move |n| RoomMode {
            frequency: round_tenth(SPEED_OF_SOUND_FT_S / 2.0 * (n as f64 / dim)),
            kind: ModeKind::Axial,
            axis: axis.to_string(),
            label: format!("{n}{short}"),
        })
    });

    let tangential = TANGENTIAL_MODES.iter().map(|&(nl, nw, nh, label)| RoomMode {
        frequency: round_tenth(mode_frequency(dims, nl, nw, nh)),
        kind: ModeKind::Tangential,
        axis: label.to_string(),
        label: label.to_string(),
    });

    let mut modes: Vec<RoomMode> = axial
        .chain(tangential)
        .filter(|m| m.frequency <= MAX_MODE_FREQUENCY_HZ)
        .collect();
    // stable: ties keep axial-before-tangential computation order
    modes.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
    modes
}

fn mode_frequency(dims: &RoomDimensions, nl: u32, nw: u32, nh: u32) -> f64 {
    let l = nl as f64 / dims.length;
    let w = nw as f64 / dims.width;
    let h = nh as f64 / dims.height;
    SPEED_OF_SOUND_FT_S / 2.0 * (l * l + w * w + h * h).sqrt()
}

fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn studio() -> RoomDimensions {
        RoomDimensions::new(12.3, 10.6, 8.2)
    }

    fn find<'a>(modes: &'a [RoomMode], label: &str) -> &'a RoomMode {
        modes.iter().find(|m| m.label == label).unwrap()
    }

    #[test]
    fn sorted_ascending_and_bounded() {
        let modes = compute_room_modes(&studio());
        assert!(modes.windows(2).all(|w| w[0].frequency <= w[1].frequency));
        assert!(modes.iter().all(|m| m.frequency <= 500.0));
        assert!(modes.iter().all(|m| m.kind != ModeKind::Oblique));
    }

    #[test]
    fn studio_has_all_axial_and_tangential_candidates() {
        let modes = compute_room_modes(&studio());
        assert_eq!(modes.len(), 14);
        assert_eq!(modes.iter().filter(|m| m.kind == ModeKind::Axial).count(), 9);
    }

    #[test]
    fn first_axial_modes() {
        let modes = compute_room_modes(&studio());
        let l1 = find(&modes, "1L");
        assert_eq!(l1.frequency, ((1130.0 / (2.0 * 12.3)) * 10.0_f64).round() / 10.0);
        assert_eq!(l1.frequency, 45.9);
        assert_eq!(l1.axis, "Length");
        assert_eq!(l1.kind, ModeKind::Axial);
        assert_eq!(find(&modes, "1W").frequency, 53.3);
        assert_eq!(find(&modes, "1W").axis, "Width");
        assert_eq!(find(&modes, "1H").frequency, 68.9);
        assert_eq!(find(&modes, "1H").axis, "Height");
    }

    #[test]
    fn axial_ordering_follows_dimensions() {
        let modes = compute_room_modes(&studio());
        let (l, w, h) = (find(&modes, "1L"), find(&modes, "1W"), find(&modes, "1H"));
        assert!(h.frequency > w.frequency && w.frequency > l.frequency);
        assert!((find(&modes, "2L").frequency - 2.0 * l.frequency).abs() < 0.15);
    }

    #[test]
    fn tangential_modes_use_combined_label() {
        let modes = compute_room_modes(&studio());
        let t = find(&modes, "1L-1W");
        assert_eq!(t.kind, ModeKind::Tangential);
        assert_eq!(t.axis, "1L-1W");
        let expected = 565.0 * ((1.0 / 12.3_f64).powi(2) + (1.0 / 10.6_f64).powi(2)).sqrt();
        assert!((t.frequency - expected).abs() < 0.051);
    }

    #[test]
    fn small_room_drops_high_modes() {
        let modes = compute_room_modes(&RoomDimensions::new(3.0, 2.0, 1.0));
        // 1H = 565, above the limit; 1L = 188.3, 2L = 376.7, 3L = 565
        assert!(modes.iter().all(|m| !m.label.ends_with('H')));
        assert!(modes.iter().any(|m| m.label == "2L"));
        assert!(!modes.iter().any(|m| m.label == "3L"));
    }

    #[test]
    fn filter_applies_after_rounding() {
        // 1L: 565 / 1.13 = 500.0000..., rounds to 500.0 and is kept
        let modes = compute_room_modes(&RoomDimensions::new(1.13, 0.5, 0.5));
        assert_eq!(find(&modes, "1L").frequency, 500.0);
    }

    #[test]
    fn ties_keep_axial_first() {
        let modes = compute_room_modes(&RoomDimensions::new(10.0, 10.0, 10.0));
        let first: Vec<&str> = modes.iter().take(3).map(|m| m.label.as_str()).collect();
        assert_eq!(first, vec!["1L", "1W", "1H"]);
    }

    #[test]
    fn deterministic() {
        assert_eq!(compute_room_modes(&studio()), compute_room_modes(&studio()));
    }

    #[test]
    fn serializes_kind_as_type() {
        let modes = compute_room_modes(&studio());
        let json = serde_json::to_value(&modes[0]).unwrap();
        assert_eq!(json["type"], "axial");
        assert_eq!(json["label"], "1L");
    }
}
