//! Scene file support for glint.
//!
//! Two formats are understood:
//!
//! - **Text** (any extension other than `.json`): one record per line,
//!   whitespace separated, `#` starts a comment.
//!
//!   ```text
//!   S x y z radius r g b shininess                       # sphere
//!   L r g b x y z radius                                 # light sphere
//!   C ex ey ez lx ly lz ux uy uz width height fov near far   # camera
//!   G height r g b shininess                             # ground plane
//!   K r g b                                              # sky colour
//!   T x0 y0 z0 x1 y1 z1 x2 y2 z2 r g b shininess         # triangle
//!   ```
//!
//! - **JSON** (`.json`): a serialized [`Scene`](crate::Scene).
//!
//! # Example
//!
//! ```ignore
//! use glint_core::scene_file::load_scene;
//!
//! let scene = load_scene("scenes/spheres.txt")?;
//! ```

mod loader;
mod parser;

pub use loader::load_scene;
pub use parser::parse_scene;

use thiserror::Error;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for scene loading operations.
pub type SceneResult<T> = Result<T, SceneError>;
