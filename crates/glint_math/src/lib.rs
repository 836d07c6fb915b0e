// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod onb;
mod ray;
mod transform;

pub use interval::Interval;
pub use onb::{reflect, Onb};
pub use ray::Ray;
pub use transform::{Mat4Ext, W_EPSILON};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_cross_and_dot() {
        let c = Vec3::X.cross(Vec3::Y);
        assert_eq!(c, Vec3::Z);
        assert_eq!(c.dot(Vec3::X), 0.0);
    }
}
