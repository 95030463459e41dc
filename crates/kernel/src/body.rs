use glam::{Mat3, Quat, Vec3};
use physworld_common::{BodyId, Transform};
use serde::{Deserialize, Serialize};

use crate::descriptor::ObjectDescriptor;
use crate::shape::{Material, Shape};

/// One simulated rigid object.
///
/// A body with `inverse_mass == 0` is static: forces may be accumulated on
/// it, but integration and contact response never move it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub shape: Shape,
    pub material: Material,
    mass: f32,
    inverse_mass: f32,
    /// Body-local inverse inertia diagonal. Zero for static bodies.
    inverse_inertia: Vec3,

    pub position: Vec3,
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,

    force_accumulator: Vec3,
    torque_accumulator: Vec3,
}

impl Body {
    /// Create a body at rest at the origin. `mass == 0` makes it static.
    pub fn new(id: BodyId, shape: Shape, mass: f32, material: Material) -> Self {
        let inverse_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        Self {
            id,
            shape,
            material,
            mass,
            inverse_mass,
            inverse_inertia: shape.inverse_inertia(mass),
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            force_accumulator: Vec3::ZERO,
            torque_accumulator: Vec3::ZERO,
        }
    }

    /// Build the body for a (validated) scenario object.
    pub fn from_descriptor(id: BodyId, object: &ObjectDescriptor, material: Material) -> Self {
        Self::new(id, Shape::from_object(object.kind, object.size), object.mass, material)
            .with_position(Vec3::from_array(object.position))
            .with_velocity(Vec3::from_array(object.velocity))
    }

    /// The static ground: an upward-facing half-space at `height`.
    pub fn ground(id: BodyId, height: f32, material: Material) -> Self {
        Self::new(id, Shape::HalfSpace { normal: Vec3::Y }, 0.0, material)
            .with_position(Vec3::new(0.0, height, 0.0))
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.linear_velocity = velocity;
        self
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    pub fn force(&self) -> Vec3 {
        self.force_accumulator
    }

    pub fn torque(&self) -> Vec3 {
        self.torque_accumulator
    }

    /// Add a force through the centre of mass for the current sub-step.
    #[inline]
    pub fn apply_force(&mut self, force: Vec3) {
        self.force_accumulator += force;
    }

    #[inline]
    pub fn apply_torque(&mut self, torque: Vec3) {
        self.torque_accumulator += torque;
    }

    /// Instantaneous change of momentum at the centre of mass.
    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.linear_velocity += impulse * self.inverse_mass;
    }

    /// Instantaneous impulse at a world-space offset `r` from the centre of mass.
    #[inline]
    pub fn apply_impulse_at(&mut self, impulse: Vec3, r: Vec3) {
        self.linear_velocity += impulse * self.inverse_mass;
        self.angular_velocity += self.inverse_inertia_world() * r.cross(impulse);
    }

    pub fn clear_accumulators(&mut self) {
        self.force_accumulator = Vec3::ZERO;
        self.torque_accumulator = Vec3::ZERO;
    }

    /// `I⁻¹_world = R · I⁻¹_local · Rᵀ`.
    pub fn inverse_inertia_world(&self) -> Mat3 {
        let r = Mat3::from_quat(self.orientation);
        r * Mat3::from_diagonal(self.inverse_inertia) * r.transpose()
    }

    /// Velocity of the material point at world-space offset `r`.
    pub fn point_velocity(&self, r: Vec3) -> Vec3 {
        self.linear_velocity + self.angular_velocity.cross(r)
    }

    /// Translational plus rotational kinetic energy.
    pub fn kinetic_energy(&self) -> f32 {
        let linear = 0.5 * self.mass * self.linear_velocity.length_squared();
        let local_w = self.orientation.inverse() * self.angular_velocity;
        let rotational: f32 = [
            (local_w.x, self.inverse_inertia.x),
            (local_w.y, self.inverse_inertia.y),
            (local_w.z, self.inverse_inertia.z),
        ]
        .iter()
        .filter(|(_, inv)| *inv > 0.0)
        .map(|(w, inv)| 0.5 * w * w / inv)
        .sum();
        linear + rotational
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.orientation,
        }
    }

    pub(crate) fn kinematics(&self) -> Kinematics {
        Kinematics {
            position: self.position,
            orientation: self.orientation,
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.orientation.is_finite()
            && self.linear_velocity.is_finite()
            && self.angular_velocity.is_finite()
    }

    /// Roll back to `saved` and stop all motion.
    pub(crate) fn freeze_at(&mut self, saved: Kinematics) {
        self.position = saved.position;
        self.orientation = saved.orientation;
        self.linear_velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
        self.clear_accumulators();
    }
}

/// Saved kinematic state of a body, used to undo a diverged sub-step.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Kinematics {
    pub position: Vec3,
    pub orientation: Quat,
}
