//! Global force fields: gravity and wind.
//!
//! Both act through the centre of mass, so neither produces torque. Wind is
//! a uniform horizontal push with no drag coefficient or cross-section term.

use glam::Vec3;

use crate::body::Body;

/// Gravity vector for a scalar magnitude: `(0, -g, 0)`.
pub fn gravity_vector(magnitude: f32) -> Vec3 {
    Vec3::new(0.0, -magnitude, 0.0)
}

/// Force applied to every dynamic body for a scalar wind speed.
pub fn wind_force(speed: f32, scale: f32) -> Vec3 {
    Vec3::new(speed * scale, 0.0, 0.0)
}

/// Reset every accumulator, then add `gravity * mass` and the wind force.
///
/// Static bodies receive gravity nominally (their mass is zero) and no wind.
pub fn apply_global_forces(bodies: &mut [Body], gravity: Vec3, wind: Vec3) {
    for body in bodies.iter_mut() {
        body.clear_accumulators();
        body.apply_force(gravity * body.mass());
        if !body.is_static() {
            body.apply_force(wind);
        }
    }
}
