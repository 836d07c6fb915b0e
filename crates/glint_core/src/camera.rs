//! Pinhole camera.
//!
//! Holds the user-facing placement and lens fields and keeps the derived
//! view, projection and inverse view-projection matrices in sync with them.
//! Every setter recomputes the matrices before returning.

use glint_math::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CameraDescription", into = "CameraDescription")]
pub struct Camera {
    // Placement
    position: Vec3,
    look_at: Vec3,
    up: Vec3,

    // Image and lens
    width: u32,
    height: u32,
    fov: f32, // Vertical field of view in degrees
    near: f32,
    far: f32,

    // Derived (recomputed by update())
    view: Mat4,
    projection: Mat4,
    inverse_view_projection: Mat4,
}

impl Camera {
    /// Create a new camera. `fov` is the vertical field of view in degrees.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position: Vec3,
        look_at: Vec3,
        up: Vec3,
        width: u32,
        height: u32,
        fov: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut camera = Self {
            position,
            look_at,
            up,
            width,
            height,
            fov,
            near,
            far,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            inverse_view_projection: Mat4::IDENTITY,
        };
        camera.update();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// Width over height; 1.0 for a zero-height camera.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Get the view matrix (world → camera space)
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Get the projection matrix (camera → clip space)
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Inverse of `projection * view` (clip → world space).
    pub fn inverse_view_projection(&self) -> Mat4 {
        self.inverse_view_projection
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update();
    }

    pub fn set_look_at(&mut self, look_at: Vec3) {
        self.look_at = look_at;
        self.update();
    }

    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
        self.update();
    }

    /// Update the image size (and with it the aspect ratio).
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.update();
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        self.update();
    }

    /// Update the near and far clip distances.
    pub fn set_clip(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.update();
    }

    fn update(&mut self) {
        self.view = Mat4::look_at_rh(self.position, self.look_at, self.up);
        self.projection =
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect(), self.near, self.far);
        self.inverse_view_projection = (self.projection * self.view).inverse();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vec3::new(0.0, 2.0, 5.0),
            Vec3::ZERO,
            Vec3::Y,
            320,
            240,
            90.0,
            1.0,
            100.0,
        )
    }
}

/// The serialized form of a [`Camera`]: just its input fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CameraDescription {
    position: Vec3,
    look_at: Vec3,
    #[serde(default = "default_up")]
    up: Vec3,
    width: u32,
    height: u32,
    fov: f32,
    near: f32,
    far: f32,
}

fn default_up() -> Vec3 {
    Vec3::Y
}

impl From<CameraDescription> for Camera {
    fn from(desc: CameraDescription) -> Self {
        Camera::new(
            desc.position,
            desc.look_at,
            desc.up,
            desc.width,
            desc.height,
            desc.fov,
            desc.near,
            desc.far,
        )
    }
}

impl From<Camera> for CameraDescription {
    fn from(camera: Camera) -> Self {
        Self {
            position: camera.position,
            look_at: camera.look_at,
            up: camera.up,
            width: camera.width,
            height: camera.height,
            fov: camera.fov,
            near: camera.near,
            far: camera.far,
        }
    }
}
