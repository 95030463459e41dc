//! Collision geometry and surface materials.
//!
//! # Collider shapes
//! - [`Shape::Sphere`]: radius about the body origin
//! - [`Shape::Box`]: oriented box given by half-extents
//! - [`Shape::Cylinder`]: possibly tapered cylinder along the body-local Y axis
//! - [`Shape::HalfSpace`]: infinite solid below a plane, used by the ground

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::descriptor::ObjectKind;

/// Segment count used for rocket cylinders.
pub const ROCKET_SEGMENTS: u32 = 8;

/// Support points closer than this to the deepest one count as tied.
const SUPPORT_TIE_EPSILON: f32 = 1e-3;

/// Geometry of a body. Immutable once the body exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere {
        radius: f32,
    },
    Box {
        half_extents: Vec3,
    },
    Cylinder {
        top_radius: f32,
        bottom_radius: f32,
        height: f32,
        /// Tessellation hint for renderers; collision treats the cylinder as smooth.
        segments: u32,
    },
    /// Everything on the far side of the plane through the body origin with
    /// the given (world-space) outward normal.
    HalfSpace {
        normal: Vec3,
    },
}

impl Shape {
    /// Build the shape for a scenario object from its `size` triple.
    ///
    /// Spheres take `size[0]` as radius, boxes and buildings treat `size` as
    /// full extents, rockets become a cylinder tapering from `size[0]` at the
    /// bottom to a quarter of that at the top, `size[1]` tall.
    pub fn from_object(kind: ObjectKind, size: [f32; 3]) -> Self {
        match kind {
            ObjectKind::Sphere => Self::Sphere { radius: size[0] },
            ObjectKind::Box | ObjectKind::Building => Self::Box {
                half_extents: Vec3::from_array(size) * 0.5,
            },
            ObjectKind::Rocket => Self::Cylinder {
                top_radius: size[0] / 4.0,
                bottom_radius: size[0],
                height: size[1],
                segments: ROCKET_SEGMENTS,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Box { .. } => "box",
            Self::Cylinder { .. } => "cylinder",
            Self::HalfSpace { .. } => "half-space",
        }
    }

    /// Diagonal of the body-local inverse inertia tensor for a solid of the
    /// given mass. Zero for massless bodies and half-spaces, and on any axis
    /// whose inertia is too small to invert in `f32` (such a body translates
    /// but never spins).
    ///
    /// Tapered cylinders use the mean radius.
    pub fn inverse_inertia(&self, mass: f32) -> Vec3 {
        if mass <= 0.0 {
            return Vec3::ZERO;
        }
        let inertia = match *self {
            Self::Sphere { radius } => Vec3::splat(0.4 * mass * radius * radius),
            Self::Box { half_extents: h } => {
                let (x2, y2, z2) = (4.0 * h.x * h.x, 4.0 * h.y * h.y, 4.0 * h.z * h.z);
                Vec3::new(y2 + z2, x2 + z2, x2 + y2) * (mass / 12.0)
            }
            Self::Cylinder {
                top_radius,
                bottom_radius,
                height,
                ..
            } => {
                let r = 0.5 * (top_radius + bottom_radius);
                let side = mass * (3.0 * r * r + height * height) / 12.0;
                Vec3::new(side, 0.5 * mass * r * r, side)
            }
            Self::HalfSpace { .. } => return Vec3::ZERO,
        };
        let invert = |i: f32| {
            let inv = 1.0 / i;
            if inv.is_finite() { inv } else { 0.0 }
        };
        Vec3::new(invert(inertia.x), invert(inertia.y), invert(inertia.z))
    }

    /// Furthest point of the shape along `direction` (unit length), for a
    /// body at `position` with `orientation`.
    ///
    /// When several extreme points tie (a box face or a cylinder cap lying
    /// flat) their average is returned, so flat contacts sit under the centre
    /// instead of at an arbitrary corner. Half-spaces have no finite support
    /// and return `None`.
    pub fn support(&self, position: Vec3, orientation: Quat, direction: Vec3) -> Option<Vec3> {
        match *self {
            Self::Sphere { radius } => Some(position + direction * radius),
            Self::Box { half_extents: h } => {
                let corners = [
                    Vec3::new(-h.x, -h.y, -h.z),
                    Vec3::new(h.x, -h.y, -h.z),
                    Vec3::new(-h.x, h.y, -h.z),
                    Vec3::new(h.x, h.y, -h.z),
                    Vec3::new(-h.x, -h.y, h.z),
                    Vec3::new(h.x, -h.y, h.z),
                    Vec3::new(-h.x, h.y, h.z),
                    Vec3::new(h.x, h.y, h.z),
                ]
                .map(|c| position + orientation * c);
                Some(extreme_average(&corners, direction))
            }
            Self::Cylinder {
                top_radius,
                bottom_radius,
                height,
                ..
            } => {
                let axis = orientation * Vec3::Y;
                let half = axis * (0.5 * height);
                let radial = direction - axis * direction.dot(axis);
                // Near-parallel axis: the whole cap faces `direction`.
                let rim = if radial.length_squared() > 1e-6 {
                    radial.normalize()
                } else {
                    Vec3::ZERO
                };
                let caps = [
                    position + half + rim * top_radius,
                    position - half + rim * bottom_radius,
                ];
                Some(extreme_average(&caps, direction))
            }
            Self::HalfSpace { .. } => None,
        }
    }
}

/// Average of the points that lie furthest along `direction`.
fn extreme_average(points: &[Vec3], direction: Vec3) -> Vec3 {
    let best = points
        .iter()
        .map(|p| p.dot(direction))
        .fold(f32::NEG_INFINITY, f32::max);
    let mut sum = Vec3::ZERO;
    let mut count = 0u32;
    for p in points {
        if best - p.dot(direction) <= SUPPORT_TIE_EPSILON {
            sum += *p;
            count += 1;
        }
    }
    if count == 0 {
        // Only reachable with non-finite input; the caller's guard handles it.
        return points.first().copied().unwrap_or(Vec3::ZERO);
    }
    sum / count as f32
}

/// Surface response coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Coulomb friction coefficient in `[0, 1]`.
    pub friction: f32,
    /// Restitution (bounciness) in `[0, 1]`.
    pub restitution: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.4,
            restitution: 0.3,
        }
    }
}

impl Material {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(0.0..=1.0).contains(&self.friction) {
            return Err("friction must lie in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err("restitution must lie in [0, 1]");
        }
        Ok(())
    }

    /// Coefficients for a contact between two materials: the lower
    /// restitution and the geometric mean of the frictions.
    pub fn combine(&self, other: &Material) -> Material {
        Material {
            friction: (self.friction * other.friction).sqrt(),
            restitution: self.restitution.min(other.restitution),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn sphere_uses_first_size_component() {
        let shape = Shape::from_object(ObjectKind::Sphere, [0.24, 5.0, 5.0]);
        assert_eq!(shape, Shape::Sphere { radius: 0.24 });
    }

    #[test]
    fn box_and_building_are_halved() {
        let expected = Shape::Box {
            half_extents: Vec3::new(10.0, 50.0, 10.0),
        };
        assert_eq!(Shape::from_object(ObjectKind::Building, [20.0, 100.0, 20.0]), expected);
        assert_eq!(Shape::from_object(ObjectKind::Box, [20.0, 100.0, 20.0]), expected);
    }

    #[test]
    fn rocket_is_tapered_cylinder() {
        let shape = Shape::from_object(ObjectKind::Rocket, [2.0, 10.0, 2.0]);
        assert_eq!(
            shape,
            Shape::Cylinder {
                top_radius: 0.5,
                bottom_radius: 2.0,
                height: 10.0,
                segments: 8,
            }
        );
    }

    #[test]
    fn sphere_inverse_inertia() {
        let inv = Shape::Sphere { radius: 1.0 }.inverse_inertia(2.0);
        assert!(approx_vec(inv, Vec3::splat(1.0 / 0.8)));
    }

    #[test]
    fn massless_bodies_have_no_inertia() {
        let inv = Shape::Box {
            half_extents: Vec3::ONE,
        }
        .inverse_inertia(0.0);
        assert_eq!(inv, Vec3::ZERO);
    }

    #[test]
    fn vanishing_inertia_inverts_to_zero() {
        let tiny = Shape::Sphere { radius: 1e-15 };
        let inv = tiny.inverse_inertia(1e-10);
        assert!(inv.is_finite());
        assert_eq!(inv, Vec3::ZERO);
    }

    #[test]
    fn box_inertia_is_larger_about_long_axes() {
        let inv = Shape::Box {
            half_extents: Vec3::new(1.0, 3.0, 1.0),
        }
        .inverse_inertia(1.0);
        // Rotating about Y only involves the short X/Z extents.
        assert!(inv.y > inv.x);
        assert!((inv.x - inv.z).abs() < 1e-6);
    }

    #[test]
    fn sphere_support_is_along_direction() {
        let s = Shape::Sphere { radius: 0.5 };
        let p = s.support(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY, -Vec3::Y).unwrap();
        assert!(approx_vec(p, Vec3::new(1.0, 1.5, 3.0)));
    }

    #[test]
    fn flat_box_support_is_face_centre() {
        let b = Shape::Box {
            half_extents: Vec3::new(1.0, 0.5, 2.0),
        };
        let p = b.support(Vec3::new(0.0, 4.0, 0.0), Quat::IDENTITY, -Vec3::Y).unwrap();
        assert!(approx_vec(p, Vec3::new(0.0, 3.5, 0.0)));
    }

    #[test]
    fn tilted_box_support_is_a_corner_or_edge() {
        let b = Shape::Box {
            half_extents: Vec3::ONE,
        };
        let q = Quat::from_rotation_z(0.3);
        let p = b.support(Vec3::ZERO, q, -Vec3::Y).unwrap();
        // Lower than the flat face would be.
        assert!(p.y < -1.0);
    }

    #[test]
    fn upright_cylinder_support_is_bottom_cap_centre() {
        let c = Shape::from_object(ObjectKind::Rocket, [2.0, 10.0, 2.0]);
        let p = c.support(Vec3::ZERO, Quat::IDENTITY, -Vec3::Y).unwrap();
        assert!(approx_vec(p, Vec3::new(0.0, -5.0, 0.0)));
    }

    #[test]
    fn lying_cylinder_support_uses_wider_end() {
        let c = Shape::from_object(ObjectKind::Rocket, [2.0, 10.0, 2.0]);
        let q = Quat::from_rotation_z(FRAC_PI_2);
        let p = c.support(Vec3::ZERO, q, -Vec3::Y).unwrap();
        // The bottom cap (radius 2) reaches lower than the top cap (0.5).
        assert!((p.y + 2.0).abs() < 1e-4);
    }

    #[test]
    fn half_space_has_no_support() {
        let g = Shape::HalfSpace { normal: Vec3::Y };
        assert!(g.support(Vec3::ZERO, Quat::IDENTITY, -Vec3::Y).is_none());
    }

    #[test]
    fn material_combination() {
        let a = Material {
            friction: 0.4,
            restitution: 0.3,
        };
        let b = Material {
            friction: 0.9,
            restitution: 0.8,
        };
        let c = a.combine(&b);
        assert!((c.friction - 0.6).abs() < 1e-6);
        assert_eq!(c.restitution, 0.3);
    }

    #[test]
    fn material_default_and_range() {
        assert_eq!(Material::default().friction, 0.4);
        assert_eq!(Material::default().restitution, 0.3);
        assert!(
            Material {
                friction: 1.5,
                restitution: 0.0
            }
            .validate()
            .is_err()
        );
    }
}
