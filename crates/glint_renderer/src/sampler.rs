//! Per-pixel supersampling.
//!
//! Each pixel is sampled at `supersample_count` sub-pixel offsets, with
//! `rays_per_pixel` paths traced through each offset. The average over an
//! offset is clamped to [0, 1] before it is added to the pixel total, so a
//! single very bright offset cannot dominate the pixel.

use glint_core::{Color, Scene};
use glint_math::{Interval, Vec2};
use rand::RngCore;

use crate::{gen_f32, generate_ray, trace, RenderOptions};

/// Sum of clamped per-offset colours for one pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelAccumulator {
    total: Color,
    offsets: u32,
}

impl PixelAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the average colour of one sub-pixel offset, clamped per channel.
    pub fn add_offset(&mut self, colour: Color) {
        let clamped = Color::new(
            Interval::UNIT.clamp(colour.x),
            Interval::UNIT.clamp(colour.y),
            Interval::UNIT.clamp(colour.z),
        );
        self.total += clamped;
        self.offsets += 1;
    }

    /// Mean of the clamped offsets, scaled by `exposure`.
    pub fn resolve(&self, exposure: f32) -> Color {
        if self.offsets == 0 {
            return Color::ZERO;
        }
        self.total / self.offsets as f32 * exposure
    }
}

/// Sub-pixel offset in [-0.5, 0.5]², or the pixel centre when jitter is off.
pub fn jitter_offset(options: &RenderOptions, rng: &mut dyn RngCore) -> Vec2 {
    if options.jitter {
        Vec2::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5)
    } else {
        Vec2::ZERO
    }
}

/// Trace one path through pixel `(x, y)` at the given sub-pixel offset.
///
/// A ray that cannot be generated resolves to the sky colour.
pub fn sample_ray(
    scene: &Scene,
    options: &RenderOptions,
    x: u32,
    y: u32,
    offset: Vec2,
    rng: &mut dyn RngCore,
) -> Color {
    match generate_ray(&scene.camera, options.width, options.height, x, y, offset) {
        Some(ray) => trace(ray, scene, options, rng).colour,
        None => scene.sky_colour,
    }
}

/// Render a single pixel with supersampling.
pub fn render_pixel(scene: &Scene, options: &RenderOptions, x: u32, y: u32, rng: &mut dyn RngCore) -> Color {
    let rays = options.rays_per_pixel.max(1);
    let mut pixel = PixelAccumulator::new();

    for _ in 0..options.supersample_count {
        let offset = jitter_offset(options, rng);

        let mut offset_colour = Color::ZERO;
        for _ in 0..rays {
            offset_colour += sample_ray(scene, options, x, y, offset, rng);
        }
        pixel.add_offset(offset_colour / rays as f32);
    }

    pixel.resolve(options.exposure)
}
