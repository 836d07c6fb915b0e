//! Render configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::DEFAULT_BUCKET_SIZE;

/// Errors reported before any ray is traced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid render options: {0}")]
    InvalidOptions(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Russian-roulette path termination.
///
/// Once a path has bounced more than `start_bounce` times it survives with
/// probability equal to its largest throughput channel, and survivors are
/// divided by that probability. This keeps the estimator unbiased but adds
/// variance: dark paths die early, and the ones that live get brighter,
/// which shows up as speckle at low sample counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RussianRoulette {
    pub start_bounce: u32,
}

/// Render configuration. Immutable for the duration of a render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Maximum number of surface bounces per path
    pub max_bounces: u32,
    /// Rays traced per sub-pixel offset
    pub rays_per_pixel: u32,
    /// Number of jittered sub-pixel offsets per pixel
    pub supersample_count: u32,
    /// Scale applied to the final pixel colour
    pub exposure: f32,
    /// Randomize sub-pixel offsets; when false every offset is the pixel centre
    pub jitter: bool,
    /// Russian-roulette termination, off by default
    pub roulette: Option<RussianRoulette>,
    /// Seed for reproducible renders; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Edge length of the square buckets used by the parallel renderer
    pub bucket_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            max_bounces: 3,
            rays_per_pixel: 5,
            supersample_count: 1,
            exposure: 1.0,
            jitter: true,
            roulette: None,
            seed: None,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderOptions {
    /// Set output resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, rays_per_pixel: u32, supersample_count: u32, max_bounces: u32) -> Self {
        self.rays_per_pixel = rays_per_pixel;
        self.supersample_count = supersample_count;
        self.max_bounces = max_bounces;
        self
    }

    /// Number of pixels in the output image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check that the options describe a renderable image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidOptions(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.rays_per_pixel == 0 {
            return Err(RenderError::InvalidOptions(
                "rays_per_pixel must be at least 1".into(),
            ));
        }
        if self.supersample_count == 0 {
            return Err(RenderError::InvalidOptions(
                "supersample_count must be at least 1".into(),
            ));
        }
        if self.bucket_size == 0 {
            return Err(RenderError::InvalidOptions(
                "bucket_size must be at least 1".into(),
            ));
        }
        if !self.exposure.is_finite() || self.exposure < 0.0 {
            return Err(RenderError::InvalidOptions(format!(
                "exposure must be finite and non-negative, got {}",
                self.exposure
            )));
        }
        Ok(())
    }
}
