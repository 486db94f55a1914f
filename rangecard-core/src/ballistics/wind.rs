//! Wind geometry relative to the line of fire

use std::fmt;

use serde::{Deserialize, Serialize};

/// Empirical hold scale, mil per mph of full-value crosswind
const WIND_HOLD_MIL_PER_MPH: f64 = 0.1;

/// Which side the shooter holds into the wind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WindSide {
    Left,
    Right,
}

impl fmt::Display for WindSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindSide::Left => write!(f, "LEFT"),
            WindSide::Right => write!(f, "RIGHT"),
        }
    }
}

/// Signed angle between the wind source direction and the line of fire
///
/// Wind direction uses the meteorological "from" convention. The result
/// is folded into [-180, 180); 0 means the wind blows straight down the
/// line of fire toward the target. The +540 offset keeps the modulo
/// argument positive for any in-range inputs, and `rem_euclid` makes
/// the fold exact for arbitrary real angles.
pub fn wind_relative(wind_direction_deg: f64, azimuth_deg: f64) -> f64 {
    (wind_direction_deg - azimuth_deg + 540.0).rem_euclid(360.0) - 180.0
}

/// Crosswind hold in mils
///
/// Crosswind component of the wind speed scaled by
/// [`WIND_HOLD_MIL_PER_MPH`]. Headwind and tailwind (relative angle
/// near 0 or ±180) yield near-zero hold. Always non-negative; the hold
/// side carries the direction.
pub fn wind_hold(relative_deg: f64, wind_speed_mph: f64) -> f64 {
    relative_deg.to_radians().sin().abs() * wind_speed_mph * WIND_HOLD_MIL_PER_MPH
}

/// Hold side for a signed relative wind angle
pub fn wind_side(relative_deg: f64) -> WindSide {
    if relative_deg >= 0.0 {
        WindSide::Right
    } else {
        WindSide::Left
    }
}

/// Wind direction as an hour on the clock face
///
/// 30 degrees per hour, rounded to the nearest sector; sector 0 reads
/// as 12 o'clock.
pub fn wind_clock(relative_deg: f64) -> u8 {
    let sector = (relative_deg.abs() / 30.0).round() as u8;
    if sector == 0 {
        12
    } else {
        sector
    }
}

/// Rotation angle in degrees for a wind arrow icon at a target
///
/// Screen-space rotation for the renderer; intentionally unnormalized
/// since rotations are periodic anyway.
pub fn wind_arrow_rotation(wind_direction_deg: f64, azimuth_deg: f64) -> f64 {
    wind_direction_deg - azimuth_deg + 90.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_angle_fold() {
        // Wind from 315, firing north: wind 45 degrees off the left
        assert_eq!(wind_relative(315.0, 0.0), -45.0);
        // Firing into the wind
        assert_eq!(wind_relative(90.0, 90.0), 0.0);
        // Dead tailwind folds to -180
        assert_eq!(wind_relative(270.0, 90.0), -180.0);
    }

    #[test]
    fn test_relative_angle_periodic() {
        for azimuth in [0.0, 37.5, 90.0, 181.0, 359.0] {
            let base = wind_relative(315.0, azimuth);
            assert_eq!(base, wind_relative(315.0 + 360.0, azimuth));
            assert_eq!(base, wind_relative(315.0 - 360.0, azimuth));
        }
    }

    #[test]
    fn test_wind_hold_values() {
        // Full-value crosswind: 10 mph at 90 degrees = 1.0 mil
        assert!((wind_hold(90.0, 10.0) - 1.0).abs() < 1e-12);
        // Headwind holds nothing
        assert!(wind_hold(0.0, 10.0).abs() < 1e-12);
        // Quartering wind
        let quartering = wind_hold(45.0, 12.0);
        assert!((quartering - 12.0 * 0.1 * std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        // Sign of the angle never makes the hold negative
        assert_eq!(wind_hold(-45.0, 12.0), wind_hold(45.0, 12.0));
    }

    #[test]
    fn test_wind_side() {
        assert_eq!(wind_side(0.0), WindSide::Right);
        assert_eq!(wind_side(90.0), WindSide::Right);
        assert_eq!(wind_side(-0.001), WindSide::Left);
        assert_eq!(wind_side(-180.0), WindSide::Left);
    }

    #[test]
    fn test_wind_clock_sectors() {
        assert_eq!(wind_clock(0.0), 12);
        assert_eq!(wind_clock(180.0), 6);
        assert_eq!(wind_clock(-30.0), 1);
        assert_eq!(wind_clock(15.0), 1); // rounds to the nearest sector
        assert_eq!(wind_clock(-90.0), 3);
    }

    #[test]
    fn test_wind_clock_in_range() {
        let mut angle = -180.0;
        while angle < 180.0 {
            let clock = wind_clock(angle);
            assert!((1..=12).contains(&clock), "clock {clock} for angle {angle}");
            angle += 1.0;
        }
    }

    #[test]
    fn test_arrow_rotation() {
        assert_eq!(wind_arrow_rotation(315.0, 0.0), 405.0);
        assert_eq!(wind_arrow_rotation(315.0, 90.0), 315.0);
        assert_eq!(wind_arrow_rotation(0.0, 270.0), -180.0);
    }

    #[test]
    fn test_wind_side_display() {
        assert_eq!(format!("{}", WindSide::Left), "LEFT");
        assert_eq!(format!("{}", WindSide::Right), "RIGHT");
    }
}
