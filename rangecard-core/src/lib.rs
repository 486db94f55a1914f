//! # Rangecard Core
//!
//! Platform-independent targeting computation library for digital range
//! cards.
//!
//! Turns shooter and target positions into firing-solution data: range,
//! bearing, elevation hold, and wind hold, plus a maximum point-blank
//! range solve. The map, panels, and data entry live in a consuming
//! application; this crate is pure computation with no I/O, no async,
//! and no platform-specific code.
//!
//! # Architecture
//!
//! - **geo**: great-circle distance and initial bearing on a spherical
//!   Earth
//! - **ballistics**: flat-fire elevation hold, density-altitude
//!   velocity correction, wind-clock resolution, MPBR solver
//! - **profile**: named gun profiles and the active-profile store
//! - **targets**: target reference points (TRPs) and their derived
//!   firing solutions
//! - **engine**: the recompute-propagation policy
//! - **session**: explicit session state and the command surface a UI
//!   drives
//!
//! # Usage
//!
//! ```rust,ignore
//! use rangecard_core::{Environment, GunProfile, Position, TargetingSession};
//!
//! let shooter = Position::new(46.5585, -113.2240)?;
//! let environment = Environment::new(12.0, 315.0, 7200.0)?;
//! let mut session = TargetingSession::new(shooter, environment, GunProfile::reference_308());
//!
//! // A map click lands a new target reference point
//! session.on_trp_created("RIDGE", Position::new(46.5630, -113.2150)?)?;
//!
//! // Render the engagement panel and the MPBR ring
//! if let Some(summary) = session.engagement() {
//!     println!("{summary}");
//! }
//! println!("{}", session.mpbr());
//! ```

pub mod ballistics;
pub mod engine;
pub mod error;
pub mod geo;
pub mod profile;
pub mod session;
pub mod targets;

pub use ballistics::{
    elevation_hold, solve_mpbr, velocity_adjusted, wind_arrow_rotation, wind_clock, wind_hold,
    wind_relative, wind_side, MpbrSolution, WindSide,
};
pub use engine::{recalculate_all, recalculate_one, Environment};
pub use error::TargetingError;
pub use geo::{cardinal, distance_and_bearing, Position, EARTH_RADIUS_M};
pub use profile::{BcType, GunProfile, GunProfileStore};
pub use session::{
    EngagementSummary, TargetingSession, WindArrow, DEFAULT_TARGET_HEIGHT_IN,
};
pub use targets::{FiringSolution, TargetRegistry, Trp};
