//! Ray-primitive intersection record.

use glint_math::Vec3;

/// Tolerance for degenerate intersections: coincident sphere roots and
/// near-parallel triangle planes both resolve to a miss below this.
pub const EPSILON: f32 = 1e-9;

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the (unit) ray direction
    pub distance: f32,
    /// Point of intersection
    pub location: Vec3,
    /// Surface normal at the intersection (unit length)
    pub normal: Vec3,
}

impl RayHit {
    pub fn new(distance: f32, location: Vec3, normal: Vec3) -> Self {
        Self {
            distance,
            location,
            normal,
        }
    }
}
