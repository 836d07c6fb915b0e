// Transform utilities for Mat4
//
// Extends glam::Mat4 with a homogeneous projection that refuses to divide by
// a vanishing w. glam's own project_point3() divides unconditionally.

use glam::{Mat4, Vec3, Vec4};

/// Smallest |w| accepted by [`Mat4Ext::project_point_checked`].
pub const W_EPSILON: f32 = 1e-8;

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a point (w=1) and divide by the resulting homogeneous w.
    ///
    /// Returns `None` when |w| is below [`W_EPSILON`] or the result is not
    /// finite.
    fn project_point_checked(&self, point: Vec3) -> Option<Vec3>;
}

impl Mat4Ext for Mat4 {
    fn project_point_checked(&self, point: Vec3) -> Option<Vec3> {
        let clip = *self * Vec4::new(point.x, point.y, point.z, 1.0);
        if !clip.w.is_finite() || clip.w.abs() < W_EPSILON {
            return None;
        }

        let projected = clip.truncate() / clip.w;
        projected.is_finite().then_some(projected)
    }
}
