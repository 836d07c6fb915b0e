use crate::Vec3;

/// A ray in 3D space with origin, unit direction, and bounce count.
///
/// The direction is normalized on construction so intersection code can
/// rely on `|direction| == 1`. `bounces` counts how many surface
/// interactions produced this ray; camera rays start at zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub bounces: u32,
}

impl Ray {
    /// Create a camera ray (zero bounces). The direction is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_bounces(origin, direction, 0)
    }

    /// Create a ray with an explicit bounce count.
    pub fn with_bounces(origin: Vec3, direction: Vec3, bounces: u32) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            bounces,
        }
    }

    /// The continuation of this ray after one more surface interaction.
    pub fn bounced(&self, origin: Vec3, direction: Vec3) -> Self {
        Self::with_bounces(origin, direction, self.bounces + 1)
    }

    /// Returns true if origin and direction are finite and the direction
    /// is non-degenerate.
    pub fn is_valid(&self) -> bool {
        self.origin.is_finite()
            && self.direction.is_finite()
            && self.direction.length_squared() > 0.5
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0));

        assert_eq!(ray.direction, Vec3::Z);
        assert_eq!(ray.bounces, 0);
        assert!(ray.is_valid());
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_bounced_increments() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let next = ray.bounced(Vec3::ONE, Vec3::new(2.0, 0.0, 0.0));
        let after = next.bounced(Vec3::ZERO, Vec3::Z);

        assert_eq!(next.bounces, 1);
        assert_eq!(next.origin, Vec3::ONE);
        assert_eq!(next.direction, Vec3::X);
        assert_eq!(after.bounces, 2);
    }

    #[test]
    fn test_zero_direction_is_invalid() {
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(!ray.is_valid());
    }
}
