//! `glint` - render a scene file (or the built-in demo scene) to an image.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use glint_core::{load_scene, Camera, Scene};
use glint_renderer::{render_image, ImageBuffer, RenderOptions, RussianRoulette};

#[derive(Parser, Debug)]
#[command(
    name = "glint",
    version,
    about = "Stochastic CPU ray tracer with spheres, a ground plane and spherical lights"
)]
struct Args {
    /// Output width in pixels (defaults to the scene camera)
    #[arg(short = 'w', long)]
    width: Option<u32>,

    /// Output height in pixels (defaults to the scene camera)
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Maximum surface bounces per path
    #[arg(short = 'b', long)]
    bounces: Option<u32>,

    /// Rays traced per sub-pixel offset
    #[arg(short = 'r', long)]
    rays: Option<u32>,

    /// Jittered sub-pixel offsets per pixel
    #[arg(short = 's', long)]
    supersamples: Option<u32>,

    /// Scale applied to every pixel
    #[arg(long)]
    exposure: Option<f32>,

    /// Scene file (text format, or JSON with a `.json` extension)
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Output image; the format follows the extension (bmp or png)
    #[arg(short = 'o', long, default_value = "test.bmp")]
    output: PathBuf,

    /// Seed for a reproducible render
    #[arg(long)]
    seed: Option<u64>,

    /// Enable Russian roulette after this many bounces
    #[arg(long, value_name = "BOUNCE")]
    roulette: Option<u32>,

    /// Sample every offset at the pixel centre
    #[arg(long)]
    no_jitter: bool,

    /// Edge length of render buckets in pixels
    #[arg(long)]
    bucket_size: Option<u32>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    /// Options from the command line. The image size falls back to the
    /// scene camera's size.
    fn render_options(&self, camera: &Camera) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            width: self.width.unwrap_or(camera.width()),
            height: self.height.unwrap_or(camera.height()),
            max_bounces: self.bounces.unwrap_or(defaults.max_bounces),
            rays_per_pixel: self.rays.unwrap_or(defaults.rays_per_pixel),
            supersample_count: self.supersamples.unwrap_or(defaults.supersample_count),
            exposure: self.exposure.unwrap_or(defaults.exposure),
            jitter: !self.no_jitter,
            roulette: self.roulette.map(|start_bounce| RussianRoulette { start_bounce }),
            seed: self.seed,
            bucket_size: self.bucket_size.unwrap_or(defaults.bucket_size),
        }
    }
}

fn load(path: Option<&Path>) -> Result<Scene> {
    match path {
        Some(path) => {
            load_scene(path).with_context(|| format!("Failed to load scene {}", path.display()))
        }
        None => {
            log::info!("No scene given, rendering the demo scene");
            Ok(Scene::demo())
        }
    }
}

fn save(image: &ImageBuffer, path: &Path) -> Result<()> {
    let format = image::ImageFormat::from_path(path)
        .with_context(|| format!("Unknown image format for {}", path.display()))?;
    if !matches!(format, image::ImageFormat::Bmp | image::ImageFormat::Png) {
        bail!("Unsupported output format {:?}; use .bmp or .png", format);
    }

    let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .context("Pixel buffer does not match image size")?;
    rgb.save_with_format(path, format)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("Saved {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let mut scene = load(args.scene.as_deref())?;
    let options = args.render_options(&scene.camera);

    let camera = &scene.camera;
    if camera.width() != options.width || camera.height() != options.height {
        log::warn!(
            "Scene camera is {}x{}, overridden to {}x{}",
            camera.width(),
            camera.height(),
            options.width,
            options.height
        );
    }
    scene.camera.set_size(options.width, options.height);

    log::info!(
        "Scene: {} primitives, {} lights",
        scene.primitive_count(),
        scene.lights.len()
    );

    let image = render_image(&scene, &options)?;
    save(&image, &args.output)
}
