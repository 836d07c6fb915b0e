//! Closed set of surface primitives with explicit dispatch.
//!
//! Primitives stay in their own contiguous `Vec`s inside the [`Scene`];
//! `Primitive` is a borrowed tag over them so the nearest-hit scan can
//! walk every surface without trait objects.
//!
//! [`Scene`]: crate::Scene

use crate::{GroundPlane, Material, RayHit, Sphere, Triangle};
use glint_math::Ray;

#[derive(Debug, Clone, Copy)]
pub enum Primitive<'a> {
    Sphere(&'a Sphere),
    Ground(&'a GroundPlane),
    Triangle(&'a Triangle),
}

impl<'a> Primitive<'a> {
    #[inline]
    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        match self {
            Primitive::Sphere(sphere) => sphere.intersect(ray),
            Primitive::Ground(ground) => ground.intersect(ray),
            Primitive::Triangle(triangle) => triangle.intersect(ray),
        }
    }

    #[inline]
    pub fn material(&self) -> &'a Material {
        match self {
            Primitive::Sphere(sphere) => &sphere.material,
            Primitive::Ground(ground) => &ground.material,
            Primitive::Triangle(triangle) => &triangle.material,
        }
    }
}
