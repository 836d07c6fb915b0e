//! Whole-image rendering.
//!
//! Both drivers write every pixel of a `width` × `height` image exactly once
//! into a [`PixelSink`]. The parallel driver renders buckets on the rayon
//! pool and writes their results from the calling thread.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use glint_core::{Color, Scene};
use glint_math::Interval;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::{generate_buckets, render_bucket, render_pixel, BucketResult, RenderOptions, RenderResult};

/// Destination for rendered pixels.
///
/// `(0, 0)` is the top-left pixel.
pub trait PixelSink {
    fn set_pixel(&mut self, x: u32, y: u32, colour: Color);
}

/// Simple in-memory image buffer, row-major from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, colour: Color) {
        let index = self.index(x, y);
        self.pixels[index] = colour;
    }

    /// Convert to packed RGB bytes for saving.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for colour in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*colour));
        }
        bytes
    }
}

impl PixelSink for ImageBuffer {
    fn set_pixel(&mut self, x: u32, y: u32, colour: Color) {
        self.set(x, y, colour);
    }
}

/// Convert a linear colour to 8-bit RGB. No gamma is applied.
pub fn color_to_rgb8(colour: Color) -> [u8; 3] {
    let channel = |c: f32| (Interval::UNIT.clamp(c) * 255.0).floor() as u8;
    [channel(colour.x), channel(colour.y), channel(colour.z)]
}

fn check_camera_size(scene: &Scene, options: &RenderOptions) {
    let camera = &scene.camera;
    if camera.width() != options.width || camera.height() != options.height {
        log::warn!(
            "Camera is {}x{} but the render is {}x{}; the image will be stretched",
            camera.width(),
            camera.height(),
            options.width,
            options.height
        );
    }
}

/// Render every pixel on the current thread, in row-major order.
pub fn render_serial(
    scene: &Scene,
    options: &RenderOptions,
    sink: &mut dyn PixelSink,
    rng: &mut dyn RngCore,
) -> RenderResult<()> {
    options.validate()?;
    check_camera_size(scene, options);

    for y in 0..options.height {
        for x in 0..options.width {
            let colour = render_pixel(scene, options, x, y, rng);
            sink.set_pixel(x, y, colour);
        }
    }

    Ok(())
}

/// Render every pixel in parallel buckets.
///
/// Each bucket draws from its own generator. With `options.seed` set, bucket
/// `i` is seeded with `seed + i`, so a render is reproducible regardless of
/// thread count.
pub fn render(scene: &Scene, options: &RenderOptions, sink: &mut dyn PixelSink) -> RenderResult<()> {
    options.validate()?;
    check_camera_size(scene, options);

    let start = Instant::now();
    let buckets = generate_buckets(options.width, options.height, options.bucket_size);
    let total = buckets.len();
    let completed = AtomicUsize::new(0);

    log::info!(
        "Rendering {}x{} ({} buckets, {} rays x {} supersamples, {} bounces)",
        options.width,
        options.height,
        total,
        options.rays_per_pixel,
        options.supersample_count,
        options.max_bounces
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = match options.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(bucket.index as u64)),
                None => StdRng::from_entropy(),
            };
            let pixels = render_bucket(bucket, scene, options, &mut rng);

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Bucket {}/{} done", done, total);

            BucketResult::new(*bucket, pixels)
        })
        .collect();

    for result in &results {
        for (x, y, colour) in result.iter_pixels() {
            sink.set_pixel(x, y, colour);
        }
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(())
}

/// Render the scene in parallel into a new [`ImageBuffer`].
pub fn render_image(scene: &Scene, options: &RenderOptions) -> RenderResult<ImageBuffer> {
    let mut image = ImageBuffer::new(options.width, options.height);
    render(scene, options, &mut image)?;
    Ok(image)
}
