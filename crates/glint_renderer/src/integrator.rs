//! The bounce loop.
//!
//! A path starts with a throughput of one and is multiplied by the base
//! colour of every surface it hits. It ends in one of four ways:
//!
//! - reaching a light: throughput × light colour
//! - leaving the scene: throughput × sky colour
//! - running out of bounces: treated like leaving the scene
//! - Russian roulette (when enabled): black
//!
//! Lights are never sampled explicitly; they only contribute when a path
//! happens to hit one. Shadow rays toward each light with additive
//! contributions are an alternative shading model and are not implemented
//! here.

use std::f32::consts::PI;

use glint_core::{Color, Scene, SurfaceHit};
use glint_math::{reflect, Onb, Ray, Vec3};
use rand::RngCore;

use crate::{gen_f32, RenderOptions};

/// Offset along the surface normal for continuation ray origins, so a
/// bounced ray cannot immediately re-hit the surface it left.
pub const EPSILON_BIAS: f32 = 1e-4;

/// How a path ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    HitLight,
    HitSky,
    MaxBounces,
    RouletteKilled,
}

/// Colour carried back by one traced path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radiance {
    pub colour: Color,
    pub termination: Termination,
    /// Surface bounces taken before termination
    pub bounces: u32,
}

impl Radiance {
    fn new(colour: Color, termination: Termination, bounces: u32) -> Self {
        Self {
            colour,
            termination,
            bounces,
        }
    }
}

/// Trace a camera ray through the scene.
pub fn trace(ray: Ray, scene: &Scene, options: &RenderOptions, rng: &mut dyn RngCore) -> Radiance {
    let mut ray = ray;
    let mut throughput = Color::ONE;

    loop {
        let bounce = ray.bounces;

        // A corrupted ray resolves to the sky instead of propagating NaN
        if !ray.is_valid() {
            return Radiance::new(throughput * scene.sky_colour, Termination::HitSky, bounce);
        }

        if bounce >= options.max_bounces {
            // Out of budget: no more intersections, unless the ray is
            // already sitting inside a light
            if let Some(light) = scene.light_containing(ray.origin) {
                let colour = light_contribution(bounce, throughput, light.colour);
                return Radiance::new(colour, Termination::HitLight, bounce);
            }
            return Radiance::new(throughput * scene.sky_colour, Termination::MaxBounces, bounce);
        }

        let surface = scene.nearest_surface(&ray);

        // Lights win ties against surfaces
        if let Some(light_hit) = scene.nearest_light(&ray) {
            let light_first = surface
                .as_ref()
                .map_or(true, |s| light_hit.hit.distance <= s.hit.distance);
            if light_first {
                let colour = light_contribution(bounce, throughput, light_hit.light.colour);
                return Radiance::new(colour, Termination::HitLight, bounce);
            }
        }

        let Some(surface) = surface else {
            return Radiance::new(throughput * scene.sky_colour, Termination::HitSky, bounce);
        };

        let direction = continuation_direction(&ray, &surface, rng);
        let origin = surface.hit.location + surface.hit.normal * EPSILON_BIAS;
        throughput *= surface.material.base_colour;
        ray = ray.bounced(origin, direction);

        if let Some(roulette) = options.roulette {
            if ray.bounces > roulette.start_bounce {
                let survival = throughput.max_element().min(1.0);
                if survival <= 0.0 || gen_f32(rng) > survival {
                    return Radiance::new(Color::ZERO, Termination::RouletteKilled, ray.bounces);
                }
                throughput /= survival;
            }
        }
    }
}

/// On the camera ray nothing has been accumulated yet, so the light colour
/// is returned as-is.
#[inline]
fn light_contribution(bounce: u32, throughput: Color, light_colour: Color) -> Color {
    if bounce == 0 {
        light_colour
    } else {
        throughput * light_colour
    }
}

/// Blend of the mirror reflection and a cosine-weighted diffuse sample,
/// weighted by shininess. Not normalized; [`Ray`] does that, and a
/// degenerate blend becomes an invalid ray.
fn continuation_direction(ray: &Ray, surface: &SurfaceHit<'_>, rng: &mut dyn RngCore) -> Vec3 {
    let shininess = surface.material.shininess;
    let normal = surface.hit.normal;

    let specular = reflect(ray.direction, normal);
    if shininess >= 1.0 {
        return specular;
    }

    let diffuse = sample_cosine_hemisphere(normal, rng);
    diffuse * (1.0 - shininess) + specular * shininess
}

/// Cosine-weighted direction on the hemisphere around `normal`.
pub fn sample_cosine_hemisphere(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let r1 = gen_f32(rng);
    let r2 = gen_f32(rng);

    let phi = 2.0 * PI * r1;
    let r = r2.sqrt();
    let local = Vec3::new(r * phi.cos(), r * phi.sin(), (1.0 - r2).max(0.0).sqrt());

    Onb::from_normal(normal).local(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RussianRoulette;
    use glint_core::{Camera, GroundPlane, Light, Material, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn options(max_bounces: u32) -> RenderOptions {
        RenderOptions::default().with_quality(1, 1, max_bounces)
    }

    fn empty_scene(sky: Color) -> Scene {
        Scene::new(Camera::default()).with_sky(sky)
    }

    #[test]
    fn test_miss_returns_sky() {
        let scene = empty_scene(Color::new(0.2, 0.4, 0.6));
        let mut rng = StdRng::seed_from_u64(1);

        let radiance = trace(Ray::new(Vec3::ZERO, Vec3::Z), &scene, &options(3), &mut rng);
        assert_eq!(radiance.colour, Color::new(0.2, 0.4, 0.6));
        assert_eq!(radiance.termination, Termination::HitSky);
        assert_eq!(radiance.bounces, 0);
    }

    #[test]
    fn test_direct_light_hit_is_unmodified() {
        let mut scene = empty_scene(Color::ZERO);
        let colour = Color::new(0.3, 2.0, 0.7);
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, 10.0), 1.0, colour));
        let mut rng = StdRng::seed_from_u64(1);

        let radiance = trace(Ray::new(Vec3::ZERO, Vec3::Z), &scene, &options(3), &mut rng);
        assert_eq!(radiance.colour, colour);
        assert_eq!(radiance.termination, Termination::HitLight);
    }

    #[test]
    fn test_light_in_front_of_sphere_wins() {
        let mut scene = empty_scene(Color::ZERO);
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, Material::default()));
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::ONE));
        let mut rng = StdRng::seed_from_u64(1);

        let radiance = trace(Ray::new(Vec3::ZERO, Vec3::Z), &scene, &options(3), &mut rng);
        assert_eq!(radiance.termination, Termination::HitLight);
    }

    #[test]
    fn test_light_behind_sphere_is_occluded() {
        let mut scene = empty_scene(Color::ZERO);
        scene.add_sphere(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::mirror(Color::ONE),
        ));
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, 10.0), 1.0, Color::ONE));
        let mut rng = StdRng::seed_from_u64(1);

        // The mirror sends the ray straight back out to a black sky
        let radiance = trace(Ray::new(Vec3::ZERO, Vec3::Z), &scene, &options(3), &mut rng);
        assert_eq!(radiance.termination, Termination::HitSky);
        assert_eq!(radiance.colour, Color::ZERO);
        assert_eq!(radiance.bounces, 1);
    }

    #[test]
    fn test_single_diffuse_bounce_tints_sky() {
        let mut scene = empty_scene(Color::ONE);
        scene.add_sphere(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::diffuse(Color::new(1.0, 0.0, 0.0)),
        ));
        let mut rng = StdRng::seed_from_u64(7);

        let radiance = trace(Ray::new(Vec3::ZERO, Vec3::Z), &scene, &options(1), &mut rng);
        assert_eq!(radiance.termination, Termination::MaxBounces);
        assert_eq!(radiance.colour, Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_bounced_ray_reaches_light() {
        let mut scene = empty_scene(Color::ZERO);
        scene.set_ground(GroundPlane::new(0.0, Material::mirror(Color::new(0.5, 0.5, 0.5))));
        scene.add_light(Light::new(Vec3::new(4.0, 2.0, 0.0), 0.5, Color::new(1.0, 1.0, 0.0)));
        let mut rng = StdRng::seed_from_u64(1);

        // Down at 45 degrees, mirrored up into the light
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let radiance = trace(ray, &scene, &options(4), &mut rng);

        assert_eq!(radiance.termination, Termination::HitLight);
        assert_eq!(radiance.bounces, 1);
        assert!((radiance.colour - Color::new(0.5, 0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_zero_bounces_skips_surfaces() {
        let mut scene = empty_scene(Color::new(0.1, 0.2, 0.3));
        scene.add_sphere(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::diffuse(Color::new(1.0, 0.0, 0.0)),
        ));
        let mut rng = StdRng::seed_from_u64(1);

        let radiance = trace(Ray::new(Vec3::ZERO, Vec3::Z), &scene, &options(0), &mut rng);
        assert_eq!(radiance.colour, Color::new(0.1, 0.2, 0.3));
        assert_eq!(radiance.termination, Termination::MaxBounces);
    }

    #[test]
    fn test_zero_bounces_inside_light() {
        let mut scene = empty_scene(Color::ZERO);
        scene.add_light(Light::new(Vec3::ZERO, 2.0, Color::new(0.9, 0.8, 0.7)));
        let mut rng = StdRng::seed_from_u64(1);

        let radiance = trace(Ray::new(Vec3::ZERO, Vec3::Z), &scene, &options(0), &mut rng);
        assert_eq!(radiance.colour, Color::new(0.9, 0.8, 0.7));
        assert_eq!(radiance.termination, Termination::HitLight);
    }

    #[test]
    fn test_bounce_budget_is_respected() {
        // Camera between two facing mirrors bounces until the budget runs out
        let mut scene = empty_scene(Color::ONE);
        let mirror = Material::mirror(Color::new(0.5, 0.5, 0.5));
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 100.0), 95.0, mirror));
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, -100.0), 95.0, mirror));
        let mut rng = StdRng::seed_from_u64(1);

        let radiance = trace(Ray::new(Vec3::ZERO, Vec3::Z), &scene, &options(4), &mut rng);
        assert_eq!(radiance.termination, Termination::MaxBounces);
        assert_eq!(radiance.bounces, 4);
        assert!((radiance.colour - Color::splat(0.0625)).length() < 1e-6);
    }

    #[test]
    fn test_roulette_kills_black_paths() {
        let mut scene = empty_scene(Color::ONE);
        scene.set_ground(GroundPlane::new(-1.0, Material::diffuse(Color::ZERO)));
        let mut opts = options(10);
        opts.roulette = Some(RussianRoulette { start_bounce: 0 });
        let mut rng = StdRng::seed_from_u64(3);

        let radiance = trace(Ray::new(Vec3::ZERO, -Vec3::Y), &scene, &opts, &mut rng);
        assert_eq!(radiance.termination, Termination::RouletteKilled);
        assert_eq!(radiance.colour, Color::ZERO);
    }

    #[test]
    fn test_roulette_never_kills_white_paths() {
        let mut scene = empty_scene(Color::ONE);
        let mirror = Material::mirror(Color::ONE);
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 100.0), 95.0, mirror));
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, -100.0), 95.0, mirror));
        let mut opts = options(6);
        opts.roulette = Some(RussianRoulette { start_bounce: 1 });
        let mut rng = StdRng::seed_from_u64(3);

        let radiance = trace(Ray::new(Vec3::ZERO, Vec3::Z), &scene, &opts, &mut rng);
        assert_eq!(radiance.termination, Termination::MaxBounces);
        assert_eq!(radiance.colour, Color::ONE);
    }

    #[test]
    fn test_roulette_survivors_are_rescaled() {
        let mut scene = empty_scene(Color::ONE);
        scene.set_ground(GroundPlane::new(-1.0, Material::mirror(Color::splat(0.5))));
        let mut opts = options(3);
        opts.roulette = Some(RussianRoulette { start_bounce: 0 });

        let runs = 2000;
        let mut survivors = 0;
        let mut total = Color::ZERO;
        for seed in 0..runs {
            let mut rng = StdRng::seed_from_u64(seed);
            let radiance = trace(Ray::new(Vec3::ZERO, -Vec3::Y), &scene, &opts, &mut rng);

            match radiance.termination {
                Termination::HitSky => {
                    // 0.5 grey divided by its 0.5 survival probability
                    assert_eq!(radiance.colour, Color::ONE);
                    survivors += 1;
                }
                Termination::RouletteKilled => assert_eq!(radiance.colour, Color::ZERO),
                other => panic!("unexpected termination {other:?}"),
            }
            total += radiance.colour;
        }

        assert!(survivors > 0 && survivors < runs);
        let mean = total / runs as f32;
        assert!((mean - Color::splat(0.5)).abs().max_element() < 0.05);
    }

    #[test]
    fn test_invalid_ray_falls_back_to_sky() {
        let scene = empty_scene(Color::new(0.5, 0.5, 0.5));
        let mut rng = StdRng::seed_from_u64(1);

        let broken = Ray::new(Vec3::ZERO, Vec3::ZERO);
        let radiance = trace(broken, &scene, &options(3), &mut rng);
        assert_eq!(radiance.colour, Color::new(0.5, 0.5, 0.5));
        assert_eq!(radiance.termination, Termination::HitSky);
    }

    #[test]
    fn test_empty_black_scene_is_black() {
        let scene = empty_scene(Color::ZERO);
        let mut rng = StdRng::seed_from_u64(1);

        for dir in [Vec3::X, Vec3::Y, Vec3::Z, -Vec3::Z] {
            let radiance = trace(Ray::new(Vec3::ZERO, dir), &scene, &options(5), &mut rng);
            assert_eq!(radiance.colour, Color::ZERO);
        }
    }

    #[test]
    fn test_cosine_samples_stay_in_hemisphere() {
        let mut rng = StdRng::seed_from_u64(99);
        let normal = Vec3::new(0.3, -0.4, 0.866).normalize();

        let mut mean_cos = 0.0;
        let n = 2000;
        for _ in 0..n {
            let d = sample_cosine_hemisphere(normal, &mut rng);
            assert!((d.length() - 1.0).abs() < 1e-4);
            assert!(d.dot(normal) >= -1e-6);
            mean_cos += d.dot(normal);
        }

        // E[cos] = 2/3 for a cosine-weighted hemisphere
        mean_cos /= n as f32;
        assert!((mean_cos - 2.0 / 3.0).abs() < 0.03);
    }
}
