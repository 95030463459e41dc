use serde::{Deserialize, Serialize};

use crate::error::WorldError;
use crate::shape::Material;

/// Tunables for a world. Defaults reproduce the reference behaviour:
/// 60 Hz sub-steps, a 0.25 s frame clamp, wind scaled by 0.1 and the ground
/// plane at `y = -1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Duration of one fixed sub-step in seconds.
    pub fixed_dt: f32,
    /// Longest wall-clock delta a single `step` call will simulate. Anything
    /// beyond is dropped.
    pub max_frame_delta: f32,
    /// Hard cap on sub-steps per `step` call.
    pub max_substeps: u32,
    /// Multiplier turning scalar wind speed into a horizontal force.
    pub wind_scale: f32,
    /// Height of the ground plane.
    pub ground_height: f32,
    /// Material given to every body, ground included.
    pub default_material: Material,
    /// Approach speeds below this bounce with zero restitution so resting
    /// contacts settle instead of jittering.
    pub resting_speed: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_frame_delta: 0.25,
            max_substeps: 15,
            wind_scale: 0.1,
            ground_height: -1.0,
            default_material: Material::default(),
            resting_speed: 0.5,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), WorldError> {
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(WorldError::InvalidConfig(format!(
                "fixed_dt must be positive, got {}",
                self.fixed_dt
            )));
        }
        if !(self.max_frame_delta.is_finite() && self.max_frame_delta >= self.fixed_dt) {
            return Err(WorldError::InvalidConfig(format!(
                "max_frame_delta must be at least fixed_dt, got {}",
                self.max_frame_delta
            )));
        }
        if self.max_substeps == 0 {
            return Err(WorldError::InvalidConfig("max_substeps must be non-zero".into()));
        }
        if !self.wind_scale.is_finite() || !self.ground_height.is_finite() {
            return Err(WorldError::InvalidConfig(
                "wind_scale and ground_height must be finite".into(),
            ));
        }
        if !(self.resting_speed.is_finite() && self.resting_speed >= 0.0) {
            return Err(WorldError::InvalidConfig(format!(
                "resting_speed must be non-negative, got {}",
                self.resting_speed
            )));
        }
        self.default_material
            .validate()
            .map_err(|reason| WorldError::InvalidConfig(reason.to_string()))
    }
}
