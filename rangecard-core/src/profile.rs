//! Gun Profiles
//!
//! Named ballistic profiles and the store that tracks which one is
//! active. Profiles are built through a validating constructor so a
//! half-entered profile never reaches the store; editing replaces the
//! whole profile or nothing.

use serde::{Deserialize, Serialize};

use crate::error::TargetingError;

/// Ballistic coefficient reference family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BcType {
    G1,
    G7,
}

/// A named ballistic profile
///
/// Only `muzzle_velocity_fps` enters the hold model. The ballistic
/// coefficient, twist, and bullet weight describe the load but are not
/// consumed by the flat-fire formulas; they stay on the profile for the
/// consuming application and for a future drag-curve model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GunProfile {
    /// Unique profile name, the store key
    pub name: String,
    /// Zero range in yards
    pub zero_range_yd: f64,
    /// Sight height over bore in inches
    pub sight_height_in: f64,
    /// Muzzle velocity in feet per second
    pub muzzle_velocity_fps: f64,
    /// Drag reference family of the published coefficient
    pub bc_type: BcType,
    /// Ballistic coefficient
    pub bc: f64,
    /// Barrel twist in inches per turn
    pub twist_in: f64,
    /// Bullet weight in grains
    pub bullet_weight_gr: f64,
}

impl GunProfile {
    /// Create a validated profile
    ///
    /// Rejects the whole profile when the name is empty or any numeric
    /// field is non-finite or non-positive (sight height may be zero).
    pub fn new(
        name: &str,
        zero_range_yd: f64,
        sight_height_in: f64,
        muzzle_velocity_fps: f64,
        bc_type: BcType,
        bc: f64,
        twist_in: f64,
        bullet_weight_gr: f64,
    ) -> Result<Self, TargetingError> {
        if name.trim().is_empty() {
            return Err(TargetingError::InvalidInput(
                "profile name must not be empty".to_string(),
            ));
        }
        for (field, value) in [
            ("zero range", zero_range_yd),
            ("muzzle velocity", muzzle_velocity_fps),
            ("ballistic coefficient", bc),
            ("twist", twist_in),
            ("bullet weight", bullet_weight_gr),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TargetingError::InvalidInput(format!(
                    "{field} must be finite and positive, got {value}"
                )));
            }
        }
        if !sight_height_in.is_finite() || sight_height_in < 0.0 {
            return Err(TargetingError::InvalidInput(format!(
                "sight height must be finite and non-negative, got {sight_height_in}"
            )));
        }
        Ok(GunProfile {
            name: name.to_string(),
            zero_range_yd,
            sight_height_in,
            muzzle_velocity_fps,
            bc_type,
            bc,
            twist_in,
            bullet_weight_gr,
        })
    }

    /// Factory reference profile: .308 Win, 175 gr SMK
    pub fn reference_308() -> Self {
        GunProfile {
            name: ".308 175 SMK".to_string(),
            zero_range_yd: 100.0,
            sight_height_in: 1.75,
            muzzle_velocity_fps: 2600.0,
            bc_type: BcType::G7,
            bc: 0.243,
            twist_in: 11.25,
            bullet_weight_gr: 175.0,
        }
    }
}

/// Named profile collection with a single active selection
///
/// Profiles keep insertion order for stable listing. The store never
/// recomputes firing solutions itself; the session triggers a recompute
/// after any mutation here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GunProfileStore {
    profiles: Vec<GunProfile>,
    active: Option<String>,
}

impl GunProfileStore {
    /// Create an empty store
    pub fn new() -> Self {
        GunProfileStore::default()
    }

    /// Create a store seeded with one profile, already active
    pub fn with_active(profile: GunProfile) -> Self {
        let active = Some(profile.name.clone());
        GunProfileStore {
            profiles: vec![profile],
            active,
        }
    }

    /// Add a profile; fails on a name collision
    pub fn add(&mut self, profile: GunProfile) -> Result<(), TargetingError> {
        if self.profiles.iter().any(|p| p.name == profile.name) {
            return Err(TargetingError::DuplicateName(profile.name));
        }
        self.profiles.push(profile);
        Ok(())
    }

    /// Look up a profile by name
    pub fn get(&self, name: &str) -> Result<&GunProfile, TargetingError> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| TargetingError::NotFound(name.to_string()))
    }

    /// Replace the profile with the same name, all-or-nothing
    pub fn update(&mut self, profile: GunProfile) -> Result<(), TargetingError> {
        match self.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => {
                *existing = profile;
                Ok(())
            }
            None => Err(TargetingError::NotFound(profile.name)),
        }
    }

    /// Select the active profile by name
    pub fn set_active(&mut self, name: &str) -> Result<(), TargetingError> {
        self.get(name)?;
        self.active = Some(name.to_string());
        Ok(())
    }

    /// The currently active profile
    pub fn active(&self) -> Result<&GunProfile, TargetingError> {
        match &self.active {
            Some(name) => self.get(name),
            None => Err(TargetingError::NoActiveProfile),
        }
    }

    /// Profile names in insertion order, for listing
    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    /// Number of stored profiles
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the store holds no profiles
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
