//! Infinite horizontal ground plane.

use crate::{Material, RayHit};
use glint_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

/// An infinite plane at `y = height` with normal `+Y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    pub height: f32,
    pub material: Material,
}

impl GroundPlane {
    pub fn new(height: f32, material: Material) -> Self {
        Self { height, material }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let dy = ray.direction.y;

        // Grazing rays never reach the plane
        if dy == 0.0 || !dy.is_finite() {
            return None;
        }

        // Moving away from the plane
        if dy > 0.0 && self.height <= ray.origin.y {
            return None;
        }
        if dy < 0.0 && self.height > ray.origin.y {
            return None;
        }

        let distance = (ray.origin.y - self.height).abs() / dy.abs();
        let mut location = ray.at(distance);
        location.y = self.height;

        Some(RayHit::new(distance, location, Vec3::Y))
    }
}
