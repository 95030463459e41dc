//! Ground contact: detection against the static half-space and impulse
//! response with Coulomb friction.
//!
//! Detection is brute force, every dynamic body against the ground. It sits
//! behind [`BroadPhase`] so an all-pairs or spatial-hash pass can be added
//! without touching the step loop.

use glam::Vec3;
use physworld_common::BodyId;

use crate::body::Body;
use crate::shape::Shape;

/// A body penetrating the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the body in the world's body list.
    pub body: usize,
    pub id: BodyId,
    /// Deepest point of the body, in world space.
    pub point: Vec3,
    /// Ground normal, pointing out of the ground toward the body.
    pub normal: Vec3,
    /// Penetration depth (positive when overlapping).
    pub depth: f32,
}

/// Contact generation strategy.
pub trait BroadPhase: std::fmt::Debug + Send {
    /// Append the contacts of `bodies` against `ground` to `out`.
    fn collect(&mut self, bodies: &[Body], ground: &Body, out: &mut Vec<Contact>);
}

/// Tests every dynamic body against the ground plane only.
#[derive(Debug, Default, Clone, Copy)]
pub struct GroundOnly;

impl BroadPhase for GroundOnly {
    fn collect(&mut self, bodies: &[Body], ground: &Body, out: &mut Vec<Contact>) {
        for (index, body) in bodies.iter().enumerate() {
            if body.is_static() {
                continue;
            }
            if let Some(contact) = ground_contact(index, body, ground) {
                out.push(contact);
            }
        }
    }
}

/// Contact between `body` and a half-space `ground`, if they overlap.
pub fn ground_contact(index: usize, body: &Body, ground: &Body) -> Option<Contact> {
    let Shape::HalfSpace { normal } = ground.shape else {
        return None;
    };
    let point = body.shape.support(body.position, body.orientation, -normal)?;
    let depth = (ground.position - point).dot(normal);
    (depth > 0.0).then_some(Contact {
        body: index,
        id: body.id,
        point,
        normal,
        depth,
    })
}

/// Push `body` out of the ground and apply restitution and friction
/// impulses at the contact point. The ground is immovable.
///
/// Approach speeds below `resting_speed` get zero restitution.
pub fn resolve_ground(body: &mut Body, ground: &Body, contact: &Contact, resting_speed: f32) {
    let inv_mass = body.inverse_mass();
    if inv_mass == 0.0 {
        return;
    }
    let n = contact.normal;
    let r = contact.point - body.position;

    // --- Positional correction ---
    // The full depth goes to the body since the ground has no inverse mass.
    body.position += n * contact.depth;

    let inv_inertia = body.inverse_inertia_world();

    let vn = body.point_velocity(r).dot(n);
    if vn >= 0.0 {
        return; // separating
    }

    let material = body.material.combine(&ground.material);
    let restitution = if -vn < resting_speed {
        0.0
    } else {
        material.restitution
    };

    // 1/m_eff = 1/m + (I⁻¹(r×n))×r·n
    let eff_inv = inv_mass + (inv_inertia * r.cross(n)).cross(r).dot(n);
    if eff_inv <= 0.0 {
        return;
    }
    let j = -(1.0 + restitution) * vn / eff_inv;
    body.apply_impulse_at(n * j, r);

    // --- Friction (Coulomb) ---
    let mu = material.friction;
    if mu <= 1e-6 {
        return;
    }
    let v = body.point_velocity(r);
    let tangent_vel = v - n * v.dot(n);
    let tangent_speed = tangent_vel.length();
    if tangent_speed <= 1e-6 {
        return;
    }
    let t = tangent_vel / tangent_speed;
    let eff_inv_t = inv_mass + (inv_inertia * r.cross(t)).cross(r).dot(t);
    if eff_inv_t <= 0.0 {
        return;
    }
    // Clamp by the friction cone: |jt| <= mu * jn.
    let jt = (-tangent_speed / eff_inv_t).max(-mu * j);
    body.apply_impulse_at(t * jt, r);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Material;
    use glam::Quat;

    fn ground() -> Body {
        Body::ground(BodyId(99), -1.0, Material::default())
    }

    fn ball_at(y: f32) -> Body {
        Body::new(BodyId(0), Shape::Sphere { radius: 0.5 }, 1.0, Material::default())
            .with_position(Vec3::new(0.0, y, 0.0))
    }

    #[test]
    fn no_contact_above_ground() {
        assert!(ground_contact(0, &ball_at(0.0), &ground()).is_none());
    }

    #[test]
    fn contact_depth_below_ground() {
        let c = ground_contact(0, &ball_at(-0.75), &ground()).unwrap();
        assert!((c.depth - 0.25).abs() < 1e-6);
        assert_eq!(c.normal, Vec3::Y);
        assert!((c.point.y + 1.25).abs() < 1e-6);
    }

    #[test]
    fn ground_only_skips_static_bodies() {
        let bodies = vec![
            ball_at(-0.75),
            Body::new(BodyId(1), Shape::Sphere { radius: 0.5 }, 0.0, Material::default())
                .with_position(Vec3::new(0.0, -5.0, 0.0)),
        ];
        let mut out = Vec::new();
        GroundOnly.collect(&bodies, &ground(), &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, BodyId(0));
    }

    #[test]
    fn fast_impact_bounces_with_restitution() {
        let g = ground();
        let mut b = ball_at(-0.6).with_velocity(Vec3::new(0.0, -10.0, 0.0));
        let c = ground_contact(0, &b, &g).unwrap();
        resolve_ground(&mut b, &g, &c, 0.5);
        assert!((b.position.y + 0.5).abs() < 1e-5);
        assert!((b.linear_velocity.y - 3.0).abs() < 1e-4);
    }

    #[test]
    fn slow_impact_settles() {
        let g = ground();
        let mut b = ball_at(-0.51).with_velocity(Vec3::new(0.0, -0.2, 0.0));
        let c = ground_contact(0, &b, &g).unwrap();
        resolve_ground(&mut b, &g, &c, 0.5);
        assert!(b.linear_velocity.y.abs() < 1e-5);
    }

    #[test]
    fn separating_body_only_gets_positional_correction() {
        let g = ground();
        let mut b = ball_at(-0.7).with_velocity(Vec3::new(0.0, 2.0, 0.0));
        let c = ground_contact(0, &b, &g).unwrap();
        resolve_ground(&mut b, &g, &c, 0.5);
        assert!((b.position.y + 0.5).abs() < 1e-5);
        assert_eq!(b.linear_velocity, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn friction_slows_sliding_and_spins_sphere() {
        let g = ground();
        let mut b = ball_at(-0.55).with_velocity(Vec3::new(5.0, -3.0, 0.0));
        let c = ground_contact(0, &b, &g).unwrap();
        resolve_ground(&mut b, &g, &c, 0.5);
        assert!(b.linear_velocity.x < 5.0);
        assert!(b.linear_velocity.x > 0.0);
        // Rolling forward along +X spins about -Z.
        assert!(b.angular_velocity.z < 0.0);
    }

    #[test]
    fn deep_penetration_is_corrected_not_rejected() {
        let g = ground();
        let mut b = ball_at(-50.0).with_velocity(Vec3::new(0.0, -300.0, 0.0));
        let c = ground_contact(0, &b, &g).unwrap();
        resolve_ground(&mut b, &g, &c, 0.5);
        assert!((b.position.y + 0.5).abs() < 1e-3);
        assert!(b.linear_velocity.y > 0.0);
    }

    #[test]
    fn tilted_box_contact_at_corner() {
        let g = ground();
        let mut b = Body::new(
            BodyId(0),
            Shape::Box {
                half_extents: Vec3::splat(0.5),
            },
            1.0,
            Material::default(),
        )
        .with_position(Vec3::new(0.0, -0.4, 0.0));
        b.orientation = Quat::from_rotation_z(0.4);
        let c = ground_contact(0, &b, &g).unwrap();
        assert!(c.point.x.abs() > 0.1);
    }
}
