//! Targeting Session
//!
//! Explicit state for everything the map UI mutates: the shooter
//! position, gun profiles, targets, environment, target height, and the
//! wind-arrow toggle. The UI layer calls the `on_*` command methods and
//! renders the outbound records; nothing here subscribes, schedules, or
//! draws. Every command completes its full recompute before returning,
//! so a renderer never observes partial state.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::ballistics::{solve_mpbr, wind_arrow_rotation, MpbrSolution, WindSide};
use crate::engine::{recalculate_all, recalculate_one, Environment};
use crate::error::TargetingError;
use crate::geo::Position;
use crate::profile::{GunProfile, GunProfileStore};
use crate::targets::{TargetRegistry, Trp};

/// Default target height for the MPBR solver, inches
pub const DEFAULT_TARGET_HEIGHT_IN: f64 = 10.0;

/// Panel record for the active engagement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSummary {
    pub name: String,
    pub distance_m: f64,
    pub azimuth_deg: f64,
    pub elevation_hold_mil: f64,
    pub wind_clock: u8,
    pub wind_hold_mil: f64,
    pub wind_side: WindSide,
}

impl fmt::Display for EngagementSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "RANGE: {:.0} m", self.distance_m)?;
        writeln!(f, "AZ: {:.0}°", self.azimuth_deg)?;
        writeln!(f, "ELEV: {:.2} mil", self.elevation_hold_mil)?;
        writeln!(f, "WIND: {} O'CLOCK", self.wind_clock)?;
        write!(f, "HOLD: {:.2} mil {}", self.wind_hold_mil, self.wind_side)
    }
}

/// Render instruction for one TRP's wind arrow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindArrow {
    pub name: String,
    pub position: Position,
    /// Screen-space rotation in degrees, unnormalized
    pub rotation_deg: f64,
}

/// All range-card state plus the command surface the UI drives
///
/// Construction requires an initial gun profile, so an active profile
/// exists for the session's whole lifetime and every recompute has one
/// to read.
#[derive(Debug, Clone)]
pub struct TargetingSession {
    shooter: Position,
    profiles: GunProfileStore,
    targets: TargetRegistry,
    environment: Environment,
    target_height_in: f64,
    mpbr: MpbrSolution,
    show_wind: bool,
}

impl TargetingSession {
    /// Create a session with an initial active profile
    pub fn new(shooter: Position, environment: Environment, initial_profile: GunProfile) -> Self {
        let mpbr = solve_mpbr(
            DEFAULT_TARGET_HEIGHT_IN,
            initial_profile.muzzle_velocity_fps,
            environment.density_altitude_ft,
        );
        let profiles = GunProfileStore::with_active(initial_profile);
        TargetingSession {
            shooter,
            profiles,
            targets: TargetRegistry::new(),
            environment,
            target_height_in: DEFAULT_TARGET_HEIGHT_IN,
            mpbr,
            show_wind: true,
        }
    }

    // =========================================================================
    // Inbound commands
    // =========================================================================

    /// The shooter marker moved
    pub fn on_shooter_moved(&mut self, position: Position) -> Result<(), TargetingError> {
        log::debug!("shooter moved to ({}, {})", position.lat, position.lon);
        self.shooter = position;
        self.recalculate()
    }

    /// A map click created a new TRP; it becomes the active target
    pub fn on_trp_created(
        &mut self,
        name: &str,
        position: Position,
    ) -> Result<(), TargetingError> {
        self.targets.create(name, position)?;
        self.targets.set_active(name)?;
        log::debug!("TRP {} created at ({}, {})", name, position.lat, position.lon);
        recalculate_one(
            self.targets.get_mut(name)?,
            self.shooter,
            &self.environment,
            self.profiles.active()?,
        );
        self.refresh_mpbr()
    }

    /// A TRP marker was dragged to a new position
    pub fn on_trp_moved(&mut self, name: &str, position: Position) -> Result<(), TargetingError> {
        self.targets.update_position(name, position)?;
        recalculate_one(
            self.targets.get_mut(name)?,
            self.shooter,
            &self.environment,
            self.profiles.active()?,
        );
        // MPBR does not depend on target positions, but the ring is
        // re-solved on every trigger so it always matches the rest of
        // the displayed state
        self.refresh_mpbr()
    }

    /// The UI selected a TRP from the list
    pub fn on_trp_selected(&mut self, name: &str) -> Result<(), TargetingError> {
        self.targets.set_active(name)
    }

    /// A new gun profile was entered; it becomes the active profile
    pub fn on_profile_created(&mut self, profile: GunProfile) -> Result<(), TargetingError> {
        let name = profile.name.clone();
        self.profiles.add(profile)?;
        self.profiles.set_active(&name)?;
        log::debug!("gun profile {} created and selected", name);
        self.recalculate()
    }

    /// The active (or any) profile was edited in place
    pub fn on_profile_edited(&mut self, profile: GunProfile) -> Result<(), TargetingError> {
        log::debug!("gun profile {} edited", profile.name);
        self.profiles.update(profile)?;
        self.recalculate()
    }

    /// The UI switched the active gun profile
    pub fn on_profile_selected(&mut self, name: &str) -> Result<(), TargetingError> {
        self.profiles.set_active(name)?;
        log::debug!("gun profile {} selected", name);
        self.recalculate()
    }

    /// Wind or density altitude changed
    pub fn on_environment_changed(
        &mut self,
        environment: Environment,
    ) -> Result<(), TargetingError> {
        self.environment = environment;
        self.recalculate()
    }

    /// The MPBR target height was set
    pub fn on_target_height_changed(&mut self, height_in: f64) -> Result<(), TargetingError> {
        if !height_in.is_finite() || height_in <= 0.0 {
            return Err(TargetingError::InvalidInput(format!(
                "target height must be finite and positive, got {height_in}"
            )));
        }
        self.target_height_in = height_in;
        self.refresh_mpbr()
    }

    /// Toggle wind-arrow display; affects rendering output only, never
    /// any numeric field
    pub fn set_wind_display(&mut self, show: bool) {
        self.show_wind = show;
    }

    // =========================================================================
    // Outbound views
    // =========================================================================

    /// Panel record for the active TRP, once it has a solution
    pub fn engagement(&self) -> Option<EngagementSummary> {
        let trp = self.targets.active()?;
        let solution = trp.solution?;
        Some(EngagementSummary {
            name: trp.name.clone(),
            distance_m: solution.distance_m,
            azimuth_deg: solution.azimuth_deg,
            elevation_hold_mil: solution.elevation_hold_mil,
            wind_clock: solution.wind_clock,
            wind_hold_mil: solution.wind_hold_mil,
            wind_side: solution.wind_side,
        })
    }

    /// Line-of-fire endpoints: shooter to the active TRP
    pub fn line_of_fire(&self) -> Option<(Position, Position)> {
        self.targets.active().map(|trp| (self.shooter, trp.position))
    }

    /// Latest MPBR solution; the ring is centered on [`Self::shooter`]
    pub fn mpbr(&self) -> MpbrSolution {
        self.mpbr
    }

    /// Wind arrows for every solved TRP, or `None` while the toggle is
    /// off
    pub fn wind_arrows(&self) -> Option<Vec<WindArrow>> {
        if !self.show_wind {
            return None;
        }
        Some(
            self.targets
                .all()
                .iter()
                .filter_map(|trp| {
                    let solution = trp.solution?;
                    Some(WindArrow {
                        name: trp.name.clone(),
                        position: trp.position,
                        rotation_deg: wind_arrow_rotation(
                            self.environment.wind_direction_deg,
                            solution.azimuth_deg,
                        ),
                    })
                })
                .collect(),
        )
    }

    /// Whole-panel state as a JSON map for external consumers
    pub fn panel_state(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        if let Ok(profile) = self.profiles.active() {
            map.insert("gunProfile".to_string(), json!(profile.name));
        }

        map.insert(
            "engagement".to_string(),
            match self.engagement() {
                Some(summary) => json!(summary),
                None => serde_json::Value::Null,
            },
        );

        map.insert(
            "wind".to_string(),
            json!({
                "speedMph": self.environment.wind_speed_mph,
                "directionDeg": self.environment.wind_direction_deg,
                "summary": self.environment.wind_summary(),
                "showArrows": self.show_wind,
            }),
        );

        map.insert(
            "mpbr".to_string(),
            json!({
                "maxRangeM": self.mpbr.max_range_m,
                "requiredHoldMil": self.mpbr.required_hold_mil,
                "targetHeightIn": self.target_height_in,
            }),
        );

        map
    }

    /// Current shooter position
    pub fn shooter(&self) -> Position {
        self.shooter
    }

    /// Current environment conditions
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Current MPBR target height in inches
    pub fn target_height_in(&self) -> f64 {
        self.target_height_in
    }

    /// Whether wind arrows are displayed
    pub fn wind_display(&self) -> bool {
        self.show_wind
    }

    /// All TRPs in insertion order
    pub fn trps(&self) -> &[Trp] {
        self.targets.all()
    }

    /// The profile store, for listing and lookups
    pub fn profiles(&self) -> &GunProfileStore {
        &self.profiles
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn recalculate(&mut self) -> Result<(), TargetingError> {
        let profile = self.profiles.active()?;
        self.mpbr = recalculate_all(
            &mut self.targets,
            self.shooter,
            &self.environment,
            profile,
            self.target_height_in,
        );
        Ok(())
    }

    fn refresh_mpbr(&mut self) -> Result<(), TargetingError> {
        let profile = self.profiles.active()?;
        self.mpbr = solve_mpbr(
            self.target_height_in,
            profile.muzzle_velocity_fps,
            self.environment.density_altitude_ft,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::BcType;
    use crate::targets::FiringSolution;

    fn session() -> TargetingSession {
        TargetingSession::new(
            Position::new(46.5585, -113.2240).unwrap(),
            Environment::new(12.0, 315.0, 7200.0).unwrap(),
            GunProfile::reference_308(),
        )
    }

    fn solutions(session: &TargetingSession) -> Vec<FiringSolution> {
        session
            .trps()
            .iter()
            .map(|t| t.solution.unwrap())
            .collect()
    }

    #[test]
    fn test_created_trp_is_active_and_solved() {
        let mut session = session();
        session
            .on_trp_created("RIDGE", Position::new(46.5630, -113.2150).unwrap())
            .unwrap();

        let summary = session.engagement().unwrap();
        assert_eq!(summary.name, "RIDGE");
        assert!(summary.distance_m > 0.0);

        let (from, to) = session.line_of_fire().unwrap();
        assert_eq!(from, session.shooter());
        assert_eq!(to, Position::new(46.5630, -113.2150).unwrap());
    }

    #[test]
    fn test_duplicate_trp_rejected_without_side_effects() {
        let mut session = session();
        session
            .on_trp_created("RIDGE", Position::new(46.5630, -113.2150).unwrap())
            .unwrap();
        let before = solutions(&session);

        let err = session
            .on_trp_created("RIDGE", Position::new(46.5700, -113.2100).unwrap())
            .unwrap_err();
        assert_eq!(err, TargetingError::DuplicateName("RIDGE".to_string()));
        assert_eq!(session.trps().len(), 1);
        assert_eq!(solutions(&session), before);
    }

    #[test]
    fn test_shooter_move_recomputes_everything() {
        let mut session = session();
        session
            .on_trp_created("RIDGE", Position::new(46.5630, -113.2150).unwrap())
            .unwrap();
        let before = session.engagement().unwrap();

        session
            .on_shooter_moved(Position::new(46.5500, -113.2300).unwrap())
            .unwrap();
        let after = session.engagement().unwrap();
        assert_ne!(before.distance_m, after.distance_m);
        assert_ne!(before.azimuth_deg, after.azimuth_deg);
    }

    #[test]
    fn test_recompute_idempotent() {
        let mut session = session();
        session
            .on_trp_created("A", Position::new(46.5630, -113.2150).unwrap())
            .unwrap();
        session
            .on_trp_created("B", Position::new(46.5500, -113.2400).unwrap())
            .unwrap();

        let shooter = session.shooter();
        session.on_shooter_moved(shooter).unwrap();
        let first = solutions(&session);
        let first_mpbr = session.mpbr();

        session.on_shooter_moved(shooter).unwrap();
        assert_eq!(solutions(&session), first);
        assert_eq!(session.mpbr(), first_mpbr);
    }

    #[test]
    fn test_profile_switch_round_trip() {
        let mut session = session();
        session
            .on_trp_created("RIDGE", Position::new(46.5630, -113.2150).unwrap())
            .unwrap();
        let original = solutions(&session);

        let hot = GunProfile::new(
            "6.5 CM 140",
            100.0,
            1.6,
            2750.0,
            BcType::G7,
            0.305,
            8.0,
            140.0,
        )
        .unwrap();
        session.on_profile_created(hot).unwrap();
        assert_ne!(solutions(&session), original);

        session.on_profile_selected(".308 175 SMK").unwrap();
        assert_eq!(solutions(&session), original);
    }

    #[test]
    fn test_profile_edit_changes_holds() {
        let mut session = session();
        session
            .on_trp_created("RIDGE", Position::new(46.5630, -113.2150).unwrap())
            .unwrap();
        let before = session.engagement().unwrap();

        let mut edited = GunProfile::reference_308();
        edited.muzzle_velocity_fps = 2500.0;
        session.on_profile_edited(edited).unwrap();

        let after = session.engagement().unwrap();
        // Slower round drops more
        assert!(after.elevation_hold_mil > before.elevation_hold_mil);
        // Geometry is untouched
        assert_eq!(after.distance_m, before.distance_m);
    }

    #[test]
    fn test_environment_change_recomputes_wind() {
        let mut session = session();
        session
            .on_trp_created("RIDGE", Position::new(46.5585, -113.2140).unwrap())
            .unwrap();
        let before = session.engagement().unwrap();

        session
            .on_environment_changed(Environment::new(20.0, 315.0, 7200.0).unwrap())
            .unwrap();
        let after = session.engagement().unwrap();
        assert!(after.wind_hold_mil > before.wind_hold_mil);
        assert_eq!(after.wind_clock, before.wind_clock);
    }

    #[test]
    fn test_target_height_drives_mpbr() {
        let mut session = session();
        assert_eq!(session.mpbr().max_range_m, 125.0);

        session.on_target_height_changed(18.0).unwrap();
        assert!(session.mpbr().max_range_m > 125.0);

        assert!(session.on_target_height_changed(0.0).is_err());
        assert!(session.on_target_height_changed(f64::NAN).is_err());
        // Failed validation leaves the height alone
        assert_eq!(session.target_height_in(), 18.0);
    }

    #[test]
    fn test_wind_toggle_render_only() {
        let mut session = session();
        session
            .on_trp_created("RIDGE", Position::new(46.5630, -113.2150).unwrap())
            .unwrap();

        let arrows = session.wind_arrows().unwrap();
        assert_eq!(arrows.len(), 1);
        let numeric_state = solutions(&session);

        session.set_wind_display(false);
        assert!(session.wind_arrows().is_none());
        assert_eq!(solutions(&session), numeric_state);

        session.set_wind_display(true);
        // Off-then-on reproduces bit-identical angles
        assert_eq!(session.wind_arrows().unwrap(), arrows);
    }

    #[test]
    fn test_panel_state_keys() {
        let mut session = session();
        session
            .on_trp_created("RIDGE", Position::new(46.5630, -113.2150).unwrap())
            .unwrap();

        let panel = session.panel_state();
        assert_eq!(panel.get("gunProfile").unwrap(), ".308 175 SMK");
        assert!(panel.get("engagement").unwrap().is_object());
        assert_eq!(panel.get("engagement").unwrap()["name"], "RIDGE");
        assert_eq!(panel.get("mpbr").unwrap()["maxRangeM"], 125.0);
        assert_eq!(panel.get("wind").unwrap()["showArrows"], true);
    }

    #[test]
    fn test_engagement_display() {
        let summary = EngagementSummary {
            name: "RIDGE".to_string(),
            distance_m: 764.6,
            azimuth_deg: 90.0,
            elevation_hold_mil: 5.8021,
            wind_clock: 5,
            wind_hold_mil: 0.85,
            wind_side: WindSide::Left,
        };
        let text = format!("{summary}");
        assert!(text.contains("RANGE: 765 m"));
        assert!(text.contains("AZ: 90°"));
        assert!(text.contains("ELEV: 5.80 mil"));
        assert!(text.contains("WIND: 5 O'CLOCK"));
        assert!(text.contains("HOLD: 0.85 mil LEFT"));
    }
}
