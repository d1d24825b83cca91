//! Recursive Phong ray tracer.
//!
//! A traced ray goes through: closest hit, local effects (emission plus
//! the diffuse and specular light of every unshadowed source), then global
//! effects (reflected and refracted rays traced recursively), and finally
//! the ambient term, added once at the top level.
//!
//! Recursion stops after [`MAX_CALC_COLOR_LEVEL`] levels or as soon as the
//! accumulated attenuation of a branch drops below [`MIN_CALC_COLOR_K`].

use super::color::*;
use super::error::*;
use super::fp::*;
use super::hittable::*;
use super::lights::*;
use super::material::*;
use super::sampler::*;
use super::scene::*;
use super::types::*;

pub const MAX_CALC_COLOR_LEVEL: u32 = 10;
pub const MIN_CALC_COLOR_K: f64 = 0.001;
const INITIAL_K: Color = Color::ONE;

pub struct RayTracer<'scene> {
    scene: &'scene Scene,
    sampler: Sampler,
}

impl<'scene> RayTracer<'scene> {
    pub fn new(scene: &'scene Scene) -> RayTracer<'scene> {
        RayTracer {
            scene,
            sampler: Sampler::default(),
        }
    }

    /// Sets the sampler used for glossy reflection and frosted refraction.
    pub fn with_sampler(mut self, sampler: Sampler) -> RayTracer<'scene> {
        self.sampler = sampler;
        self
    }

    pub fn scene(&self) -> &'scene Scene {
        self.scene
    }

    /// Color seen along `r`; the background when nothing is hit.
    pub fn trace_ray(&self, r: &Ray) -> Result<Color> {
        match self.find_closest(r) {
            None => Ok(self.scene.background),
            Some(gp) => Ok(self.calc_color(&gp, r, MAX_CALC_COLOR_LEVEL, INITIAL_K)?
                + self.scene.ambient.intensity()),
        }
    }

    fn find_closest(&self, r: &Ray) -> Option<GeoPoint<'scene>> {
        self.scene.geometries.find_closest(r, f64::INFINITY)
    }

    fn calc_color(&self, gp: &GeoPoint, r: &Ray, level: u32, k: Color) -> Result<Color> {
        let color = gp.geometry.emission + self.calc_local_effects(gp, r, k)?;
        if level <= 1 {
            return Ok(color);
        }
        Ok(color + self.calc_global_effects(gp, r, level, k)?)
    }

    fn calc_local_effects(&self, gp: &GeoPoint, r: &Ray, k: Color) -> Result<Color> {
        let v = *r.direction;
        let n = gp.normal();
        let nv = align_zero(n.dot(v));
        if nv == 0. {
            return Ok(Color::BLACK);
        }
        let material = &gp.geometry.material;

        let mut color = Color::BLACK;
        for light in &self.scene.lights {
            let l = *light.incident(gp.point)?;
            let nl = align_zero(n.dot(l));
            // Light and viewer on different sides of the surface.
            if !same_sign(nl, nv) {
                continue;
            }
            let ktr = self.transparency(gp, light.as_ref(), l, n)?;
            if ktr.scale(k).lower_than(MIN_CALC_COLOR_K) {
                continue;
            }
            let il = light.intensity_at(gp.point).scale(ktr);
            color += il.scale(diffuse(material, nl) + specular(material, n, l, nl, v));
        }
        Ok(color)
    }

    /// Fraction of the light reaching `gp` through the geometries between
    /// them.
    fn transparency(
        &self,
        gp: &GeoPoint,
        light: &(dyn LightSource + Send + Sync),
        l: Vec3,
        n: Vec3,
    ) -> Result<Color> {
        let shadow_ray = Ray::offset(gp.point, -l, n)?;
        let distance = light.distance(gp.point);
        let mut ktr = Color::ONE;
        for blocker in self.scene.geometries.find_all(&shadow_ray, distance) {
            ktr = ktr.scale(blocker.geometry.material.kt);
            if ktr.lower_than(MIN_CALC_COLOR_K) {
                return Ok(Color::BLACK);
            }
        }
        Ok(ktr)
    }

    fn calc_global_effects(&self, gp: &GeoPoint, r: &Ray, level: u32, k: Color) -> Result<Color> {
        let v = *r.direction;
        let n = gp.normal();
        let material = &gp.geometry.material;
        let mut color = Color::BLACK;

        let kkr = k.scale(material.kr);
        if !kkr.lower_than(MIN_CALC_COLOR_K) {
            let reflected = Ray::offset(gp.point, v - n * (2. * n.dot(v)), n)?;
            color += self.calc_global_effect(&reflected, material.ksg, n, level, material.kr, kkr)?;
        }

        let kkt = k.scale(material.kt);
        if !kkt.lower_than(MIN_CALC_COLOR_K) {
            let refracted = Ray::offset(gp.point, v, n)?;
            color += self.calc_global_effect(&refracted, material.kdg, n, level, material.kt, kkt)?;
        }
        Ok(color)
    }

    /// Average color of the bundle around `r`, weighted by `kx`.
    fn calc_global_effect(
        &self,
        r: &Ray,
        roughness: f64,
        n: Vec3,
        level: u32,
        kx: Color,
        kkx: Color,
    ) -> Result<Color> {
        let rays = self.sampler.super_sample(r, roughness, n)?;
        if rays.is_empty() {
            return Ok(Color::BLACK);
        }
        let mut sum = Color::BLACK;
        for ray in &rays {
            sum += match self.find_closest(ray) {
                None => self.scene.background,
                Some(gp) => self.calc_color(&gp, ray, level - 1, kkx)?,
            };
        }
        Ok(sum.reduce(rays.len() as f64).scale(kx))
    }
}

fn diffuse(material: &Material, nl: f64) -> Color {
    material.kd * nl.abs()
}

fn specular(material: &Material, n: Vec3, l: Vec3, nl: f64, v: Vec3) -> Color {
    let r = l - n * (2. * nl);
    let minus_vr = -align_zero(r.dot(v));
    material.ks * minus_vr.max(0.).powi(material.shininess)
}
