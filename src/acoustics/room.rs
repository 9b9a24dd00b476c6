use serde::{Deserialize, Serialize};

use super::units;

/// Interior dimensions of a rectangular room, in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl RoomDimensions {
    pub const fn new(length: f64, width: f64, height: f64) -> Self {
        Self { length, width, height }
    }

    /// All three dimensions are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        [self.length, self.width, self.height]
            .iter()
            .all(|d| d.is_finite() && *d > 0.0)
    }

    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    /// Dimensions converted to meters.
    pub fn to_meters(&self) -> Self {
        Self {
            length: units::feet_to_meters(self.length),
            width: units::feet_to_meters(self.width),
            height: units::feet_to_meters(self.height),
        }
    }
}

/// A named room with its geometry and, when surveyed, measured volume and
/// total surface area (ft³ / ft²).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub dimensions: RoomDimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_cu_ft: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_sq_ft: Option<f64>,
}

impl Room {
    /// Studio 8: 12.3 × 10.6 × 8.2 ft.
    pub fn studio_8() -> Self {
        Self {
            name: "Studio 8".to_string(),
            dimensions: RoomDimensions::new(12.3, 10.6, 8.2),
            volume_cu_ft: Some(1068.46),
            surface_sq_ft: Some(588.5),
        }
    }

    /// Surveyed volume, or the box volume when none was recorded.
    pub fn volume(&self) -> f64 {
        self.volume_cu_ft.unwrap_or_else(|| self.dimensions.volume())
    }

    pub fn volume_cubic_meters(&self) -> f64 {
        units::cubic_feet_to_meters(self.volume())
    }

    pub fn surface_square_meters(&self) -> Option<f64> {
        self.surface_sq_ft.map(units::square_feet_to_meters)
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::studio_8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studio_8_metric_dimensions() {
        let m = Room::studio_8().dimensions.to_meters();
        assert!((m.length - 3.749).abs() < 0.01);
        assert!((m.width - 3.231).abs() < 0.01);
        assert!((m.height - 2.499).abs() < 0.01);
    }

    #[test]
    fn surveyed_volume_wins_over_box_volume() {
        let mut room = Room::studio_8();
        assert_eq!(room.volume(), 1068.46);
        room.volume_cu_ft = None;
        assert!((room.volume() - 12.3 * 10.6 * 8.2).abs() < 1e-9);
        assert!((Room::studio_8().surface_square_meters().unwrap() - 54.67).abs() < 0.05);
    }

    #[test]
    fn metric_volume_follows_surveyed_volume() {
        let mut room = Room::studio_8();
        assert!((room.volume_cubic_meters() - 30.255).abs() < 0.01);
        room.volume_cu_ft = None;
        let boxed = 12.3 * 10.6 * 8.2 * 0.0283168;
        assert!((room.volume_cubic_meters() - boxed).abs() < 1e-9);
    }

    #[test]
    fn dimension_validation() {
        assert!(RoomDimensions::new(12.3, 10.6, 8.2).is_valid());
        assert!(!RoomDimensions::new(0.0, 10.6, 8.2).is_valid());
        assert!(!RoomDimensions::new(12.3, f64::NAN, 8.2).is_valid());
        assert!(!RoomDimensions::new(12.3, 10.6, -1.0).is_valid());
    }
}
