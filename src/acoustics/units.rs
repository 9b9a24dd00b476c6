/// Fixed imperial ↔ metric factors used across the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversions {
    pub feet_to_meters: f64,
    pub meters_to_feet: f64,
    pub square_feet_to_meters: f64,
    pub square_meters_to_feet: f64,
    pub cubic_feet_to_meters: f64,
    pub cubic_meters_to_feet: f64,
}

pub const CONVERSIONS: Conversions = Conversions {
    feet_to_meters: 0.3048,
    meters_to_feet: 3.28084,
    square_feet_to_meters: 0.092903,
    square_meters_to_feet: 10.7639,
    cubic_feet_to_meters: 0.0283168,
    cubic_meters_to_feet: 35.3147,
};

/// Room temperature, imperial.
pub const SPEED_OF_SOUND_FT_S: f64 = 1130.0;
/// Room temperature, metric.
pub const SPEED_OF_SOUND_M_S: f64 = 343.0;

pub fn feet_to_meters(feet: f64) -> f64 {
    feet * CONVERSIONS.feet_to_meters
}

pub fn square_feet_to_meters(square_feet: f64) -> f64 {
    square_feet * CONVERSIONS.square_feet_to_meters
}

pub fn cubic_feet_to_meters(cubic_feet: f64) -> f64 {
    cubic_feet * CONVERSIONS.cubic_feet_to_meters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_are_mutual_inverses() {
        let c = CONVERSIONS;
        assert!((c.feet_to_meters * c.meters_to_feet - 1.0).abs() < 1e-5);
        assert!((c.square_feet_to_meters * c.square_meters_to_feet - 1.0).abs() < 1e-4);
        assert!((c.cubic_feet_to_meters * c.cubic_meters_to_feet - 1.0).abs() < 1e-4);
    }

    #[test]
    fn area_and_volume_follow_length() {
        let c = CONVERSIONS;
        assert!((c.square_feet_to_meters - c.feet_to_meters.powi(2)).abs() < 1e-6);
        assert!((c.cubic_feet_to_meters - c.feet_to_meters.powi(3)).abs() < 1e-6);
    }

    #[test]
    fn speed_of_sound_units_agree() {
        let converted = feet_to_meters(SPEED_OF_SOUND_FT_S);
        assert!((SPEED_OF_SOUND_M_S - converted).abs() < 2.0);
    }

    #[test]
    fn studio_volume_and_area_to_metric() {
        assert!((cubic_feet_to_meters(1068.46) - 30.25).abs() < 0.05);
        assert!((square_feet_to_meters(588.5) - 54.67).abs() < 0.05);
        assert!((feet_to_meters(12.3) - 3.749).abs() < 0.005);
    }
}
