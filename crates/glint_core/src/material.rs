//! Surface material: a base colour and a shiny/diffuse blend weight.

use glint_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Material shared by all surface primitives.
///
/// `shininess` is the specular weight: `1.0` is a pure mirror, `0.0` a pure
/// diffuse surface. The shading loop blends the continuation direction
/// between the two and tints the path by `base_colour`.
///
/// Both fields stay in [0, 1]; deserialization goes through [`Material::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "MaterialDescription")]
pub struct Material {
    pub base_colour: Color,
    pub shininess: f32,
}

impl Material {
    /// Create a new material. Each colour channel and the shininess are
    /// clamped to [0, 1].
    pub fn new(base_colour: Color, shininess: f32) -> Self {
        Self {
            base_colour: base_colour.clamp(Color::ZERO, Color::ONE),
            shininess: shininess.clamp(0.0, 1.0),
        }
    }

    /// A pure diffuse material.
    pub fn diffuse(base_colour: Color) -> Self {
        Self::new(base_colour, 0.0)
    }

    /// A perfect mirror.
    pub fn mirror(base_colour: Color) -> Self {
        Self::new(base_colour, 1.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_colour: Color::ONE,
            shininess: 0.45,
        }
    }
}

#[derive(Deserialize)]
struct MaterialDescription {
    base_colour: Color,
    shininess: f32,
}

impl From<MaterialDescription> for Material {
    fn from(desc: MaterialDescription) -> Self {
        Self::new(desc.base_colour, desc.shininess)
    }
}
