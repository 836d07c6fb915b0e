//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently,
//! each with its own random number generator, so they can run in parallel
//! on the rayon pool.

use glint_core::{Color, Scene};
use rand::RngCore;

use crate::{render_pixel, RenderOptions};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets covering a `width` × `height` image, centre first.
///
/// Edge buckets are cropped to the image. A zero `bucket_size` is treated
/// as one pixel.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from the image centre.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let centre_x = width as f32 / 2.0;
    let centre_y = height as f32 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - centre_x).powi(2) + (by - centre_y).powi(2)
    };

    // Stable sort keeps row-major order between equidistant buckets
    buckets.sort_by(|a, b| {
        distance(a)
            .partial_cmp(&distance(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Render a single bucket, returning pixels in row-major order within it.
pub fn render_bucket(
    bucket: &Bucket,
    scene: &Scene,
    options: &RenderOptions,
    rng: &mut dyn RngCore,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let colour = render_pixel(scene, options, bucket.x + local_x, bucket.y + local_y, rng);
            pixels.push(colour);
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colours in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Iterate `(x, y, colour)` in image coordinates.
    pub fn iter_pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let bucket = self.bucket;
        self.pixels.iter().enumerate().map(move |(i, colour)| {
            let i = i as u32;
            (bucket.x + i % bucket.width, bucket.y + i / bucket.width, *colour)
        })
    }
}
