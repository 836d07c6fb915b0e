//! Emitter spheres.

use crate::{intersect_sphere, Color, RayHit};
use glint_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

/// A spherical light. It occludes like any sphere, and a ray that reaches
/// it first ends there with the light's colour.
///
/// The colour is not clamped; it is the emitted radiance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LightDescription")]
pub struct Light {
    pub position: Vec3,
    pub radius: f32,
    pub colour: Color,
}

impl Light {
    pub fn new(position: Vec3, radius: f32, colour: Color) -> Self {
        Self {
            position,
            radius: radius.max(0.0),
            colour,
        }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        intersect_sphere(self.position, self.radius, ray)
    }

    /// Returns true if `point` lies inside or on the light sphere.
    pub fn contains(&self, point: Vec3) -> bool {
        self.radius > 0.0 && (point - self.position).length_squared() <= self.radius * self.radius
    }
}

#[derive(Deserialize)]
struct LightDescription {
    position: Vec3,
    radius: f32,
    colour: Color,
}

impl From<LightDescription> for Light {
    fn from(desc: LightDescription) -> Self {
        Self::new(desc.position, desc.radius, desc.colour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_intersects_like_sphere() {
        let light = Light::new(Vec3::new(0.0, 0.0, 10.0), 2.0, Color::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let hit = light.intersect(&ray).unwrap();
        assert!((hit.distance - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_light_contains() {
        let light = Light::new(Vec3::ZERO, 1.0, Color::ONE);

        assert!(light.contains(Vec3::ZERO));
        assert!(light.contains(Vec3::X));
        assert!(!light.contains(Vec3::new(0.0, 1.01, 0.0)));
    }
}
