//! Camera ray generation.

use glint_core::Camera;
use glint_math::{Mat4Ext, Ray, Vec2, Vec3};

/// Generate the world-space ray through pixel `(x, y)` of a `width` x
/// `height` image, offset from the pixel centre by `jitter` (each component
/// in [-0.5, 0.5]).
///
/// The pixel maps to normalized device coordinates (y up, row 0 at the top)
/// on the near plane and is unprojected through the camera's inverse
/// view-projection. The projection carries the `tan(fov / 2)` and aspect
/// scaling. Returns `None` when the unprojection degenerates (vanishing
/// homogeneous w, non-finite camera matrices), so the caller can fall back
/// to the sky colour.
pub fn generate_ray(camera: &Camera, width: u32, height: u32, x: u32, y: u32, jitter: Vec2) -> Option<Ray> {
    if width == 0 || height == 0 {
        return None;
    }

    let ndc_x = (x as f32 + 0.5 + jitter.x) / width as f32 * 2.0 - 1.0;
    let ndc_y = 1.0 - (y as f32 + 0.5 + jitter.y) / height as f32 * 2.0;

    // Depth 0 is the near plane for a right-handed [0, 1] depth projection
    let near_point = Vec3::new(ndc_x, ndc_y, 0.0);
    let world_point = camera
        .inverse_view_projection()
        .project_point_checked(near_point)?;

    let ray = Ray::new(camera.position(), world_point - camera.position());
    ray.is_valid().then_some(ray)
}
