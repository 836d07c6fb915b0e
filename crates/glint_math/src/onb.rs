//! Orthonormal basis and reflection helpers for shading.

use glam::Vec3;

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Orthonormal basis with `w` aligned to a given normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onb {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Onb {
    /// Build a basis around `normal` (assumed unit length).
    ///
    /// The helper axis is whichever world axis is least aligned with the
    /// normal, so the cross product never degenerates.
    pub fn from_normal(normal: Vec3) -> Self {
        let a = normal.abs();
        let helper = if a.x <= a.y && a.x <= a.z {
            Vec3::X
        } else if a.y <= a.z {
            Vec3::Y
        } else {
            Vec3::Z
        };

        let w = normal;
        let u = helper.cross(w).normalize();
        let v = w.cross(u);
        Self { u, v, w }
    }

    /// Map local coordinates (x along u, y along v, z along w) to world space.
    #[inline]
    pub fn local(&self, a: Vec3) -> Vec3 {
        a.x * self.u + a.y * self.v + a.z * self.w
    }
}
