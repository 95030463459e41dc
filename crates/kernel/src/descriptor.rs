//! Scenario descriptors: the sole construction input of a [`World`](crate::World).
//!
//! Descriptors are produced by a scenario interpreter and arrive either as
//! Rust values or as JSON in the interpreter's wire shape:
//!
//! ```json
//! { "gravity": 9.81, "wind": 0,
//!   "objects": [{ "type": "sphere", "mass": 0.6, "position": [-2, 10, 0],
//!                 "velocity": [0, 0, 0], "size": [0.24, 0.24, 0.24] }] }
//! ```

use serde::{Deserialize, Serialize};

/// Kind of object requested by a scenario. Selects the collision shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Sphere,
    Box,
    Rocket,
    Building,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Box => "box",
            Self::Rocket => "rocket",
            Self::Building => "building",
        }
    }
}

/// One object of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub mass: f32,
    pub position: [f32; 3],
    #[serde(default)]
    pub velocity: [f32; 3],
    pub size: [f32; 3],
}

/// Global fields plus the ordered object list of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDescriptor {
    /// Gravity magnitude; the world pulls along `-Y`.
    pub gravity: f32,
    /// Horizontal wind speed along `+X`.
    #[serde(default)]
    pub wind: f32,
    pub objects: Vec<ObjectDescriptor>,
    /// Display name of the scenario, if the interpreter supplied one.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scenario: String,
}

/// Why a descriptor was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DescriptorError {
    #[error("could not parse descriptor: {0}")]
    Parse(String),
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: String, value: f32 },
    #[error("object {index}: mass must be >= 0, got {mass}")]
    NegativeMass { index: usize, mass: f32 },
    #[error("object {index}: size[{axis}] must be > 0, got {value}")]
    NonPositiveSize { index: usize, axis: usize, value: f32 },
}

impl ScenarioDescriptor {
    /// Parse a descriptor from JSON. Unknown object types are parse errors.
    pub fn from_json(json: &str) -> Result<Self, DescriptorError> {
        serde_json::from_str(json).map_err(|e| DescriptorError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, DescriptorError> {
        serde_json::to_string_pretty(self).map_err(|e| DescriptorError::Parse(e.to_string()))
    }

    /// Check every field a world build depends on.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        finite("gravity", self.gravity)?;
        finite("wind", self.wind)?;
        for (index, object) in self.objects.iter().enumerate() {
            object.validate(index)?;
        }
        Ok(())
    }
}

impl ObjectDescriptor {
    fn validate(&self, index: usize) -> Result<(), DescriptorError> {
        finite(&format!("objects[{index}].mass"), self.mass)?;
        if self.mass < 0.0 {
            return Err(DescriptorError::NegativeMass {
                index,
                mass: self.mass,
            });
        }
        for (axis, value) in self.position.iter().enumerate() {
            finite(&format!("objects[{index}].position[{axis}]"), *value)?;
        }
        for (axis, value) in self.velocity.iter().enumerate() {
            finite(&format!("objects[{index}].velocity[{axis}]"), *value)?;
        }
        for (axis, &value) in self.size.iter().enumerate() {
            // NaN fails this comparison too.
            if !(value > 0.0 && value.is_finite()) {
                return Err(DescriptorError::NonPositiveSize { index, axis, value });
            }
        }
        Ok(())
    }
}

fn finite(field: &str, value: f32) -> Result<(), DescriptorError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DescriptorError::NonFinite {
            field: field.to_string(),
            value,
        })
    }
}
