//! Glint Renderer - CPU stochastic ray tracing
//!
//! Turns a read-only [`Scene`] and a [`RenderOptions`] into one colour per
//! pixel:
//!
//! - `ray_gen`: pixel + sub-pixel jitter → world-space camera ray
//! - `integrator`: the bounce loop (nearest hit, light/sky termination,
//!   shiny/diffuse continuation, optional Russian roulette)
//! - `sampler`: jittered supersampling with clamp-then-average
//! - `renderer` / `bucket`: whole-image drivers, serial and rayon-parallel
//!
//! [`Scene`]: glint_core::Scene

mod bucket;
mod integrator;
mod options;
mod ray_gen;
mod renderer;
mod sampler;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use integrator::{sample_cosine_hemisphere, trace, Radiance, Termination, EPSILON_BIAS};
pub use options::{RenderError, RenderOptions, RenderResult, RussianRoulette};
pub use ray_gen::generate_ray;
pub use renderer::{
    color_to_rgb8, render, render_image, render_serial, ImageBuffer, PixelSink,
};
pub use sampler::{jitter_offset, render_pixel, sample_ray, PixelAccumulator};

/// Re-export the types that appear in this crate's signatures
pub use glint_core::{Color, Scene};
pub use glint_math::{Ray, Vec2, Vec3};

use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}
