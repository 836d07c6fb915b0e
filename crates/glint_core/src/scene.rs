//! Scene aggregate handed to the renderer.
//!
//! A `Scene` is built once (from a file, from [`Scene::demo`] or by hand)
//! and is only read while rays are traced. Nothing in the render path takes
//! `&mut Scene`, which is what lets pixels be traced concurrently.

use glint_math::{Interval, Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::{Camera, Color, GroundPlane, Light, Material, Primitive, RayHit, Sphere, Triangle};

/// Nearest intersection with a surface primitive.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit<'a> {
    pub hit: RayHit,
    pub material: &'a Material,
}

/// Nearest intersection with a light.
#[derive(Debug, Clone, Copy)]
pub struct LightHit<'a> {
    pub hit: RayHit,
    pub light: &'a Light,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub triangles: Vec<Triangle>,
    pub ground: Option<GroundPlane>,
    pub lights: Vec<Light>,
    pub camera: Camera,
    /// Colour returned for rays that leave the scene
    pub sky_colour: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl Scene {
    /// Create an empty scene with a black sky.
    pub fn new(camera: Camera) -> Self {
        Self {
            spheres: Vec::new(),
            triangles: Vec::new(),
            ground: None,
            lights: Vec::new(),
            camera,
            sky_colour: Color::ZERO,
        }
    }

    pub fn with_sky(mut self, sky_colour: Color) -> Self {
        self.sky_colour = sky_colour;
        self
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn set_ground(&mut self, ground: GroundPlane) {
        self.ground = Some(ground);
    }

    /// Number of surface primitives (spheres, triangles and the ground).
    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.triangles.len() + usize::from(self.ground.is_some())
    }

    /// True if there is nothing for a ray to hit.
    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0 && self.lights.is_empty()
    }

    /// Iterate every surface primitive.
    pub fn primitives(&self) -> impl Iterator<Item = Primitive<'_>> + '_ {
        self.spheres
            .iter()
            .map(Primitive::Sphere)
            .chain(self.ground.iter().map(Primitive::Ground))
            .chain(self.triangles.iter().map(Primitive::Triangle))
    }

    /// Nearest surface hit along `ray`, if any.
    pub fn nearest_surface(&self, ray: &Ray) -> Option<SurfaceHit<'_>> {
        let mut nearest: Option<SurfaceHit<'_>> = None;
        let mut closest_so_far = f32::INFINITY;

        for primitive in self.primitives() {
            if let Some(hit) = primitive.intersect(ray) {
                if Interval::FORWARD.contains(hit.distance) && hit.distance < closest_so_far {
                    closest_so_far = hit.distance;
                    nearest = Some(SurfaceHit {
                        hit,
                        material: primitive.material(),
                    });
                }
            }
        }

        nearest
    }

    /// Nearest light hit along `ray`, if any.
    pub fn nearest_light(&self, ray: &Ray) -> Option<LightHit<'_>> {
        let mut nearest: Option<LightHit<'_>> = None;
        let mut closest_so_far = f32::INFINITY;

        for light in &self.lights {
            if let Some(hit) = light.intersect(ray) {
                if Interval::FORWARD.contains(hit.distance) && hit.distance < closest_so_far {
                    closest_so_far = hit.distance;
                    nearest = Some(LightHit { hit, light });
                }
            }
        }

        nearest
    }

    /// The first light whose sphere contains `point`.
    pub fn light_containing(&self, point: Vec3) -> Option<&Light> {
        self.lights.iter().find(|light| light.contains(point))
    }

    /// The built-in scene used when no scene file is given.
    pub fn demo() -> Self {
        let mut scene = Scene::new(Camera::default()).with_sky(Color::new(0.0846, 0.0933, 0.0949));

        scene.add_sphere(Sphere::new(
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            Material::new(Color::new(0.0, 0.0, 1.0), 0.0),
        ));
        scene.add_sphere(Sphere::new(
            Vec3::new(2.3, 1.0, 2.5),
            0.75,
            Material::new(Color::new(1.0, 0.0, 0.0), 0.1),
        ));
        scene.add_sphere(Sphere::new(
            Vec3::new(-3.2, 1.0, -1.5),
            0.75,
            Material::new(Color::new(0.0, 1.0, 1.0), 0.9),
        ));
        scene.add_sphere(Sphere::new(
            Vec3::new(0.0, 1.0, 2.0),
            0.75,
            Material::new(Color::new(0.0, 1.0, 1.0), 0.2),
        ));

        scene.set_ground(GroundPlane::new(
            0.0,
            Material::new(Color::new(0.312, 0.785, 0.213), 0.2),
        ));

        scene.add_light(Light::new(Vec3::new(0.0, 12.0, 3.0), 5.0, Color::splat(0.1)));

        scene
    }
}
