//! Sphere primitive for ray tracing.

use crate::{Material, RayHit, EPSILON};
use glint_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SphereDescription")]
pub struct Sphere {
    pub centre: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero, which
    /// never intersects.
    pub fn new(centre: Vec3, radius: f32, material: Material) -> Self {
        Self {
            centre,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        intersect_sphere(self.centre, self.radius, ray)
    }
}

#[derive(Deserialize)]
struct SphereDescription {
    centre: Vec3,
    radius: f32,
    material: Material,
}

impl From<SphereDescription> for Sphere {
    fn from(desc: SphereDescription) -> Self {
        Self::new(desc.centre, desc.radius, desc.material)
    }
}

/// Ray-sphere test shared by surface spheres and light spheres.
///
/// Expects a unit ray direction. Returns the smallest strictly positive
/// root. Tangential hits, where both roots are within [`EPSILON`] of each
/// other, count as misses.
pub fn intersect_sphere(centre: Vec3, radius: f32, ray: &Ray) -> Option<RayHit> {
    let oc = ray.origin - centre;
    let l = ray.direction.dot(oc);
    let discriminant = l * l - oc.length_squared() + radius * radius;

    // Also rejects NaN
    if !(discriminant >= 0.0) {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let t0 = -l - sqrtd;
    let t1 = -l + sqrtd;

    if (t1 - t0).abs() < EPSILON {
        return None;
    }

    let distance = if t0 > 0.0 {
        t0
    } else if t1 > 0.0 {
        t1
    } else {
        return None;
    };

    let location = ray.at(distance);
    let normal = (location - centre).normalize();
    Some(RayHit::new(distance, location, normal))
}
