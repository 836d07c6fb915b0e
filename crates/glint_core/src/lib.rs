//! Glint Core - scene data model for the glint ray tracer.
//!
//! This crate provides:
//!
//! - **Primitives**: `Sphere`, `GroundPlane`, `Triangle` and emitter `Light`
//!   spheres, each with its own ray intersection test
//! - **Scene**: the read-only aggregate handed to the renderer, with
//!   nearest-hit queries over the closed `Primitive` set
//! - **Camera**: eager view/projection transforms
//! - **Scene files**: the line-oriented text format and JSON
//!
//! # Example
//!
//! ```ignore
//! use glint_core::scene_file::load_scene;
//!
//! let scene = load_scene("spheres.txt")?;
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitive_count(),
//!     scene.lights.len());
//! ```

pub mod camera;
pub mod hit;
pub mod material;
pub mod primitive;
pub mod scene;
pub mod scene_file;

mod ground;
mod light;
mod sphere;
mod triangle;

// Re-export commonly used types
pub use camera::Camera;
pub use ground::GroundPlane;
pub use hit::{RayHit, EPSILON};
pub use light::Light;
pub use material::{Color, Material};
pub use primitive::Primitive;
pub use scene::{LightHit, Scene, SurfaceHit};
pub use scene_file::{load_scene, parse_scene, SceneError, SceneResult};
pub use sphere::{intersect_sphere, Sphere};
pub use triangle::Triangle;
