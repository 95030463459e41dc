//! Semi-implicit (symplectic) Euler.
//!
//! Velocity is updated from the accumulated force first, then position from
//! the new velocity. Swapping the two changes the energy behaviour.

use glam::Quat;

use crate::body::Body;

/// Advance one body by `dt`. Static bodies are left untouched.
pub fn integrate(body: &mut Body, dt: f32) {
    if body.is_static() {
        return;
    }

    // --- Linear ---
    body.linear_velocity += body.force() * body.inverse_mass() * dt;
    body.position += body.linear_velocity * dt;

    // --- Angular ---
    body.angular_velocity += body.inverse_inertia_world() * body.torque() * dt;

    // q' = q + ½·dt·(0, ω)·q, renormalized against drift.
    let w = body.angular_velocity;
    let spin = Quat::from_xyzw(w.x, w.y, w.z, 0.0) * body.orientation;
    body.orientation = (body.orientation + spin * (0.5 * dt)).normalize();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Material, Shape};
    use glam::Vec3;
    use physworld_common::BodyId;

    const DT: f32 = 1.0 / 60.0;

    fn ball() -> Body {
        Body::new(BodyId(0), Shape::Sphere { radius: 0.5 }, 2.0, Material::default())
    }

    #[test]
    fn velocity_updates_before_position() {
        let mut b = ball();
        b.apply_force(Vec3::new(0.0, -2.0 * 9.81, 0.0));
        integrate(&mut b, DT);
        let v = -9.81 * DT;
        assert!((b.linear_velocity.y - v).abs() < 1e-6);
        // Position moved with the *updated* velocity.
        assert!((b.position.y - v * DT).abs() < 1e-7);
    }

    #[test]
    fn static_body_never_moves() {
        let mut g = Body::new(BodyId(0), Shape::Sphere { radius: 1.0 }, 0.0, Material::default());
        g.apply_force(Vec3::splat(1e6));
        integrate(&mut g, DT);
        assert_eq!(g.position, Vec3::ZERO);
        assert_eq!(g.linear_velocity, Vec3::ZERO);
        assert_eq!(g.orientation, Quat::IDENTITY);
    }

    #[test]
    fn torque_spins_body() {
        let mut b = ball();
        b.apply_torque(Vec3::new(0.0, 1.0, 0.0));
        integrate(&mut b, DT);
        assert!(b.angular_velocity.y > 0.0);
        assert_ne!(b.orientation, Quat::IDENTITY);
    }

    #[test]
    fn orientation_stays_normalized() {
        let mut b = ball();
        b.angular_velocity = Vec3::new(3.0, -7.0, 11.0);
        for _ in 0..600 {
            integrate(&mut b, DT);
        }
        assert!((b.orientation.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn constant_spin_matches_rotation_angle() {
        let mut b = ball();
        b.angular_velocity = Vec3::new(0.0, 1.0, 0.0);
        for _ in 0..60 {
            integrate(&mut b, DT);
        }
        let expected = Quat::from_rotation_y(1.0);
        assert!(b.orientation.dot(expected).abs() > 0.999);
    }
}
