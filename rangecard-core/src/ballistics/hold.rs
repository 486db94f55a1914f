//! Elevation hold under the flat-fire approximation

/// Standard gravity in ft/s²
pub const STANDARD_GRAVITY_FPS2: f64 = 32.174;

/// Meters-to-feet factor used throughout the hold model
pub const FEET_PER_METER: f64 = 3.281;

/// Muzzle velocity corrected for density altitude
///
/// Linear correction of 1% per 5000 ft of density altitude: thinner air
/// at high density altitude behaves like a slightly faster muzzle
/// velocity. The constant is empirical.
pub fn velocity_adjusted(muzzle_velocity_fps: f64, density_altitude_ft: f64) -> f64 {
    muzzle_velocity_fps * (1.0 + (density_altitude_ft / 5000.0) * 0.01)
}

/// Elevation hold in mils for a target at `distance_m`
///
/// Flat-fire drop over the time of flight, converted to an angular hold
/// with the small-angle approximation `hold_mil = drop / distance * 1000`.
/// The drop is `0.5 * g * t²` with `t = distance / adjusted_velocity`,
/// all in feet. Non-positive distances return 0.0 so a target sitting
/// on the shooter never produces a NaN hold.
pub fn elevation_hold(
    distance_m: f64,
    muzzle_velocity_fps: f64,
    density_altitude_ft: f64,
) -> f64 {
    if distance_m <= 0.0 {
        return 0.0;
    }
    let distance_ft = distance_m * FEET_PER_METER;
    let adjusted = velocity_adjusted(muzzle_velocity_fps, density_altitude_ft);
    let drop_ft = 0.5 * STANDARD_GRAVITY_FPS2 * (distance_ft / adjusted).powi(2);
    (drop_ft / distance_ft) * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_adjusted() {
        // 7200 ft density altitude = +1.44%
        let adjusted = velocity_adjusted(2600.0, 7200.0);
        assert!((adjusted - 2637.44).abs() < 1e-9);

        // Sea level leaves velocity unchanged
        assert_eq!(velocity_adjusted(2600.0, 0.0), 2600.0);

        // Negative density altitude slows the round
        assert!(velocity_adjusted(2600.0, -2000.0) < 2600.0);
    }

    #[test]
    fn test_hold_monotonic_in_distance() {
        let mut previous = 0.0;
        for distance in (50..=800).step_by(50) {
            let hold = elevation_hold(distance as f64, 2600.0, 7200.0);
            assert!(hold > previous, "hold must grow with distance");
            previous = hold;
        }
    }

    #[test]
    fn test_hold_drops_with_density_altitude() {
        // Faster effective velocity at altitude means less hold
        let low = elevation_hold(500.0, 2600.0, 0.0);
        let high = elevation_hold(500.0, 2600.0, 7200.0);
        assert!(high < low);
    }

    #[test]
    fn test_hold_at_zero_distance() {
        assert_eq!(elevation_hold(0.0, 2600.0, 7200.0), 0.0);
        assert_eq!(elevation_hold(-5.0, 2600.0, 7200.0), 0.0);
    }

    #[test]
    fn test_hold_reference_value() {
        // Flat-fire: hold is linear in distance, 0.5*g*ft*1000/adj² per ft
        let hold = elevation_hold(500.0, 2600.0, 7200.0);
        let adjusted: f64 = 2637.44;
        let expected = 0.5 * STANDARD_GRAVITY_FPS2 * 500.0 * FEET_PER_METER * 1000.0
            / adjusted.powi(2);
        assert!((hold - expected).abs() < 1e-9);
    }
}
