//! Firing-Solution Ballistics
//!
//! Simplified flat-fire hold model: point-mass drop without a drag
//! curve, a density-altitude velocity correction, wind-clock
//! resolution, and the maximum point-blank range solver.
//!
//! All functions are pure and take explicit parameters, so each is
//! independently testable. The ballistic coefficient stored on a gun
//! profile does not enter these formulas; it is inert metadata until a
//! drag-curve model exists.
//!
//! # Submodules
//!
//! - **hold**: density-altitude velocity correction and elevation hold
//! - **wind**: wind angle relative to the line of fire, hold, side, clock
//! - **mpbr**: maximum point-blank range scan

mod hold;
mod mpbr;
mod wind;

pub use hold::{
    elevation_hold, velocity_adjusted, FEET_PER_METER, STANDARD_GRAVITY_FPS2,
};
pub use mpbr::{solve_mpbr, MpbrSolution, SCAN_END_M, SCAN_START_M, SCAN_STEP_M};
pub use wind::{
    wind_arrow_rotation, wind_clock, wind_hold, wind_relative, wind_side, WindSide,
};
