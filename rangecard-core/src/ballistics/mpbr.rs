//! Maximum point-blank range solver

use std::fmt;

use serde::{Deserialize, Serialize};

use super::hold::{elevation_hold, velocity_adjusted, FEET_PER_METER, STANDARD_GRAVITY_FPS2};

/// Shortest candidate range in meters
pub const SCAN_START_M: u32 = 50;

/// Longest candidate range in meters
pub const SCAN_END_M: u32 = 800;

/// Candidate range step in meters
pub const SCAN_STEP_M: u32 = 5;

/// Result of the point-blank range scan
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MpbrSolution {
    /// Greatest range keeping the drop within half the target height
    pub max_range_m: f64,
    /// Elevation hold at that range
    pub required_hold_mil: f64,
}

impl fmt::Display for MpbrSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MAX: {:.0} m", self.max_range_m)?;
        write!(f, "HOLD: {:.2} mil", self.required_hold_mil)
    }
}

/// Solve for the maximum point-blank range
///
/// Scans candidate ranges from [`SCAN_START_M`] to [`SCAN_END_M`] in
/// [`SCAN_STEP_M`] steps and keeps the largest whose flat-fire drop
/// stays within half the target height (the vertical error budget for a
/// fixed point of aim). The scan always runs the full candidate range;
/// the discretized drop curve is not assumed monotonic, so a failing
/// candidate does not end the search. Returns a zero solution when no
/// candidate qualifies.
pub fn solve_mpbr(
    target_height_in: f64,
    muzzle_velocity_fps: f64,
    density_altitude_ft: f64,
) -> MpbrSolution {
    let allowed_drop_in = target_height_in / 2.0;
    let adjusted = velocity_adjusted(muzzle_velocity_fps, density_altitude_ft);

    let mut max_range_m = 0.0;
    for range in (SCAN_START_M..=SCAN_END_M).step_by(SCAN_STEP_M as usize) {
        let range_m = range as f64;
        let drop_in =
            0.5 * STANDARD_GRAVITY_FPS2 * (range_m * FEET_PER_METER / adjusted).powi(2) * 12.0;
        if drop_in <= allowed_drop_in {
            max_range_m = range_m;
        }
    }

    MpbrSolution {
        max_range_m,
        required_hold_mil: elevation_hold(max_range_m, muzzle_velocity_fps, density_altitude_ft),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_solution() {
        // 10 in target, 2600 fps, 7200 ft density altitude
        let solution = solve_mpbr(10.0, 2600.0, 7200.0);
        assert_eq!(solution.max_range_m, 125.0);
        assert!(solution.max_range_m >= SCAN_START_M as f64);
        assert!(solution.max_range_m <= SCAN_END_M as f64);
    }

    #[test]
    fn test_hold_consistent_with_elevation_hold() {
        let solution = solve_mpbr(10.0, 2600.0, 7200.0);
        let hold = elevation_hold(solution.max_range_m, 2600.0, 7200.0);
        assert_eq!(solution.required_hold_mil, hold);
    }

    #[test]
    fn test_taller_target_reaches_further() {
        let short = solve_mpbr(10.0, 2600.0, 7200.0);
        let tall = solve_mpbr(18.0, 2600.0, 7200.0);
        assert!(tall.max_range_m > short.max_range_m);
    }

    #[test]
    fn test_no_qualifying_range() {
        // An impossibly small target fails even the 50 m candidate
        let solution = solve_mpbr(0.1, 2600.0, 7200.0);
        assert_eq!(solution.max_range_m, 0.0);
        assert_eq!(solution.required_hold_mil, 0.0);
    }

    #[test]
    fn test_display_format() {
        let solution = MpbrSolution {
            max_range_m: 125.0,
            required_hold_mil: 0.9485,
        };
        assert_eq!(format!("{solution}"), "MAX: 125 m\nHOLD: 0.95 mil");
    }
}
