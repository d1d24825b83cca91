//! Secondary ray bundles for glossy reflection and frosted refraction.

use super::error::*;
use super::fp::*;
use super::types::*;
use itertools::iproduct;

/// Spreads one secondary ray into a bundle aimed through a square target
/// grid orthogonal to the ray. The target sits `distance` along the ray and
/// its side is the surface roughness, so rougher surfaces scatter wider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sampler {
    resolution: usize,
    distance: f64,
}

impl Default for Sampler {
    fn default() -> Sampler {
        Sampler {
            resolution: 1,
            distance: 100.,
        }
    }
}

impl Sampler {
    /// A sampler tracing `resolution²` rays per rough bounce. A resolution
    /// of 1 traces only the ideal ray.
    pub fn new(resolution: usize) -> Result<Sampler> {
        if resolution == 0 {
            return invalid("sampler resolution must be at least 1");
        }
        Ok(Sampler {
            resolution,
            ..Sampler::default()
        })
    }

    pub fn with_distance(mut self, distance: f64) -> Result<Sampler> {
        if align_zero(distance) <= 0. {
            return invalid(format!("sampler distance must be positive, got {}", distance));
        }
        self.distance = distance;
        Ok(self)
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Perturbed copies of `r`. Rays that would cross to the other side of
    /// the surface with normal `normal` than `r` itself are dropped, so the
    /// bundle may be empty.
    pub fn super_sample(&self, r: &Ray, roughness: f64, normal: Vec3) -> Result<Vec<Ray>> {
        if self.resolution == 1 || is_zero(roughness) {
            return Ok(vec![*r]);
        }
        let side = r.direction.dot(normal);

        let u = any_orthogonal(&r.direction);
        let w = r.direction.cross(u);
        let center = *r.direction * self.distance;
        let cell = roughness / self.resolution as f64;
        let half = roughness / 2.;

        let mut rays = Vec::with_capacity(self.resolution * self.resolution);
        for (i, j) in iproduct!(0..self.resolution, 0..self.resolution) {
            let du = (i as f64 + 0.5) * cell - half;
            let dw = (j as f64 + 0.5) * cell - half;
            let direction = center + u * du + w * dw;
            if same_sign(direction.dot(normal), side) {
                rays.push(Ray::new(r.origin, direction)?);
            }
        }
        Ok(rays)
    }
}
