//! Recompute Orchestration
//!
//! Owns the recompute-propagation policy: which events refresh which
//! derived fields. A shooter move, profile change, or environment
//! change refreshes every TRP and the MPBR solve; a single TRP move
//! refreshes that TRP and still re-solves MPBR so the rendered ring
//! stays anchored to the shooter.
//!
//! Recomputation reads the profile and environment immutably and writes
//! only per-TRP derived fields, so the whole pass is deterministic and
//! idempotent for unchanged inputs.

use serde::{Deserialize, Serialize};

use crate::ballistics::{
    elevation_hold, solve_mpbr, wind_clock, wind_hold, wind_relative, wind_side, MpbrSolution,
};
use crate::error::TargetingError;
use crate::geo::{cardinal, distance_and_bearing, Position};
use crate::profile::GunProfile;
use crate::targets::{FiringSolution, TargetRegistry, Trp};

/// Wind and air condition inputs
///
/// Wind direction uses the meteorological "from" convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Wind speed in mph
    pub wind_speed_mph: f64,
    /// Direction the wind blows from, 0..360
    pub wind_direction_deg: f64,
    /// Density altitude in feet; may be negative
    pub density_altitude_ft: f64,
}

impl Environment {
    /// Create validated environment conditions
    pub fn new(
        wind_speed_mph: f64,
        wind_direction_deg: f64,
        density_altitude_ft: f64,
    ) -> Result<Self, TargetingError> {
        if !wind_speed_mph.is_finite() || wind_speed_mph < 0.0 {
            return Err(TargetingError::InvalidInput(format!(
                "wind speed must be finite and non-negative, got {wind_speed_mph}"
            )));
        }
        if !wind_direction_deg.is_finite() || !(0.0..=360.0).contains(&wind_direction_deg) {
            return Err(TargetingError::InvalidInput(format!(
                "wind direction must be within 0..360, got {wind_direction_deg}"
            )));
        }
        if !density_altitude_ft.is_finite() {
            return Err(TargetingError::InvalidInput(format!(
                "density altitude must be finite, got {density_altitude_ft}"
            )));
        }
        Ok(Environment {
            wind_speed_mph,
            wind_direction_deg,
            density_altitude_ft,
        })
    }

    /// Panel line like "12 MPH FROM NW (315°)"
    pub fn wind_summary(&self) -> String {
        format!(
            "{} MPH FROM {} ({}°)",
            self.wind_speed_mph,
            cardinal(self.wind_direction_deg),
            self.wind_direction_deg
        )
    }
}

/// Recompute the derived firing solution for one TRP
///
/// Distance and azimuth from the shooter, then the elevation hold and
/// the wind fields against the active profile and environment. Pure
/// with respect to its inputs aside from writing the TRP's solution.
pub fn recalculate_one(
    trp: &mut Trp,
    shooter: Position,
    environment: &Environment,
    profile: &GunProfile,
) {
    let (distance_m, azimuth_deg) = distance_and_bearing(shooter, trp.position);
    let relative = wind_relative(environment.wind_direction_deg, azimuth_deg);
    trp.solution = Some(FiringSolution {
        distance_m,
        azimuth_deg,
        elevation_hold_mil: elevation_hold(
            distance_m,
            profile.muzzle_velocity_fps,
            environment.density_altitude_ft,
        ),
        wind_relative_deg: relative,
        wind_hold_mil: wind_hold(relative, environment.wind_speed_mph),
        wind_side: wind_side(relative),
        wind_clock: wind_clock(relative),
    });
    log::trace!(
        "{}: range {:.0} m, azimuth {:.0}°, wind {:.0}° relative",
        trp.name,
        distance_m,
        azimuth_deg,
        relative
    );
}

/// Recompute every TRP in the registry, then re-solve MPBR
///
/// TRPs are refreshed in insertion order. The returned MPBR solution
/// depends on the profile, environment, and target height only; it is
/// re-solved on every call regardless of which event triggered the
/// pass.
pub fn recalculate_all(
    registry: &mut TargetRegistry,
    shooter: Position,
    environment: &Environment,
    profile: &GunProfile,
    target_height_in: f64,
) -> MpbrSolution {
    for trp in registry.all_mut() {
        recalculate_one(trp, shooter, environment, profile);
    }
    solve_mpbr(
        target_height_in,
        profile.muzzle_velocity_fps,
        environment.density_altitude_ft,
    )
}
