//! Target Reference Points
//!
//! The registry of named, positioned targets and their derived firing
//! solutions. TRPs live for the whole session; there is no delete. At
//! most one TRP is active at a time - the one whose engagement summary
//! is shown and whose line of fire is drawn.

use serde::{Deserialize, Serialize};

use crate::ballistics::WindSide;
use crate::error::TargetingError;
use crate::geo::Position;

/// Derived firing solution for one TRP
///
/// Written by the engine on every recompute; never edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiringSolution {
    /// Great-circle distance from the shooter in meters
    pub distance_m: f64,
    /// Initial bearing from the shooter, 0..360
    pub azimuth_deg: f64,
    /// Elevation hold in mils
    pub elevation_hold_mil: f64,
    /// Signed wind angle relative to the line of fire, -180..180
    pub wind_relative_deg: f64,
    /// Crosswind hold in mils
    pub wind_hold_mil: f64,
    /// Side the hold goes to
    pub wind_side: WindSide,
    /// Wind direction as a clock hour, 1..=12
    pub wind_clock: u8,
}

/// A named target reference point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trp {
    /// Unique target name, the registry key
    pub name: String,
    /// Target position, mutable while the marker is dragged
    pub position: Position,
    /// Derived fields; `None` until the first recompute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<FiringSolution>,
}

/// Insertion-ordered TRP collection with a single active selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetRegistry {
    trps: Vec<Trp>,
    active: Option<String>,
}

impl TargetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        TargetRegistry::default()
    }

    /// Create a TRP with no solution yet
    ///
    /// Fails on an empty name or a name collision; the registry is
    /// unchanged on failure.
    pub fn create(&mut self, name: &str, position: Position) -> Result<&Trp, TargetingError> {
        if name.trim().is_empty() {
            return Err(TargetingError::InvalidInput(
                "TRP name must not be empty".to_string(),
            ));
        }
        if self.trps.iter().any(|t| t.name == name) {
            return Err(TargetingError::DuplicateName(name.to_string()));
        }
        self.trps.push(Trp {
            name: name.to_string(),
            position,
            solution: None,
        });
        Ok(&self.trps[self.trps.len() - 1])
    }

    /// Look up a TRP by name
    pub fn get(&self, name: &str) -> Result<&Trp, TargetingError> {
        self.trps
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| TargetingError::NotFound(name.to_string()))
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Result<&mut Trp, TargetingError> {
        self.trps
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| TargetingError::NotFound(name.to_string()))
    }

    /// Move a TRP to a new position; its solution is stale until the
    /// next recompute
    pub fn update_position(
        &mut self,
        name: &str,
        position: Position,
    ) -> Result<(), TargetingError> {
        self.get_mut(name)?.position = position;
        Ok(())
    }

    /// Select the active TRP by name
    pub fn set_active(&mut self, name: &str) -> Result<(), TargetingError> {
        self.get(name)?;
        self.active = Some(name.to_string());
        Ok(())
    }

    /// The currently active TRP, if any
    pub fn active(&self) -> Option<&Trp> {
        self.active.as_deref().and_then(|name| self.get(name).ok())
    }

    /// All TRPs in insertion order, for stable listing
    pub fn all(&self) -> &[Trp] {
        &self.trps
    }

    pub(crate) fn all_mut(&mut self) -> &mut [Trp] {
        &mut self.trps
    }

    /// Number of TRPs
    pub fn len(&self) -> usize {
        self.trps.len()
    }

    /// Whether the registry holds no TRPs
    pub fn is_empty(&self) -> bool {
        self.trps.is_empty()
    }
}
