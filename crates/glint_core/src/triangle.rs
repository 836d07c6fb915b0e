//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{Material, RayHit, EPSILON};
use glint_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

/// A triangle primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        Self {
            v0,
            v1,
            v2,
            material,
        }
    }

    /// Geometric face normal (counter-clockwise winding), or zero for a
    /// degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        (self.v1 - self.v0)
            .cross(self.v2 - self.v0)
            .normalize_or_zero()
    }

    /// Möller-Trumbore ray-triangle intersection algorithm.
    ///
    /// The reported normal faces against the ray.
    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(edge2);
        let det = edge1.dot(h);

        // Ray is parallel to triangle
        if !(det.abs() >= EPSILON) {
            return None;
        }

        let f = 1.0 / det;
        let s = ray.origin - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if t <= EPSILON {
            return None;
        }

        let normal = self.normal();
        if normal == Vec3::ZERO {
            return None;
        }
        let normal = if ray.direction.dot(normal) < 0.0 {
            normal
        } else {
            -normal
        };

        Some(RayHit::new(t, ray.at(t), normal))
    }
}
