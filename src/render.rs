//! Image rendering: one traced color per pixel, pixels traced in parallel.

use super::camera::*;
use super::color::*;
use super::error::*;
use super::rng::*;
use super::tracer::*;
use super::types::*;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const BYTES_PER_PIXEL: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: usize,
    pub height: usize,
    /// Jittered camera rays per pixel.
    pub samples: usize,
    pub seed: u64,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            width: 1200,
            height: 800,
            samples: 1,
            seed: 0,
        }
    }
}

/// Renders an RGB8 image, rows top to bottom. `progress` is incremented
/// once per finished pixel.
///
/// Runs on the current rayon pool; wrap the call in
/// [`rayon::ThreadPool::install`] to pick the pool.
pub fn render(
    tracer: &RayTracer,
    camera: &Camera,
    options: &RenderOptions,
    progress: &AtomicUsize,
) -> Result<Vec<u8>> {
    let RenderOptions {
        width,
        height,
        samples,
        seed,
    } = *options;
    if width == 0 || height == 0 {
        return invalid(format!("image resolution {}x{} must be positive", width, height));
    }
    if samples == 0 {
        return invalid("at least one sample per pixel is needed");
    }

    let mut pixels = vec![0u8; width * height * BYTES_PER_PIXEL];
    pixels
        .par_chunks_mut(BYTES_PER_PIXEL)
        .enumerate()
        .try_for_each(|(idx, chunk)| -> Result<()> {
            let (j, i) = (idx % width, idx / width);
            let color = if samples == 1 {
                tracer.trace_ray(&camera.construct_ray(width, height, j, i)?)?
            } else {
                let mut rng = pixel_rng(seed, idx);
                let mut sum = Color::BLACK;
                for _ in 0..samples {
                    let jitter = Vec3::gen_uniform_random_in_unit_square(&mut rng);
                    let r = camera.construct_ray_at(
                        width,
                        height,
                        j as f64 + jitter.x,
                        i as f64 + jitter.y,
                    )?;
                    sum += tracer.trace_ray(&r)?;
                }
                sum.reduce(samples as f64)
            };
            chunk.copy_from_slice(&color.to_rgb8());
            progress.fetch_add(1, Ordering::Relaxed);
            Ok(())
        })?;
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::*;
    use crate::lights::*;
    use crate::material::*;
    use crate::scene::*;
    use crate::sphere::*;

    fn scene() -> Scene {
        Scene::builder("render")
            .background(Color::new(0., 0., 1.))
            .geometry(
                Geometry::new(Sphere::new(Point3::new(0., 0., -10.), 1.).unwrap())
                    .with_material(Material::new().with_kd(0.6))
                    .with_emission(Color::new(1., 0., 0.)),
            )
            .light(DirectionalLight::new(Color::ONE, Vec3::new(0., 0., -1.)).unwrap())
            .build()
            .unwrap()
    }

    fn camera() -> Camera {
        Camera::new(Point3::zero(), Vec3::new(0., 0., -1.), Vec3::unit_y())
            .unwrap()
            .with_view_plane(4., 4.)
            .unwrap()
            .with_distance(10.)
            .unwrap()
    }

    fn pixel(pixels: &[u8], width: usize, j: usize, i: usize) -> &[u8] {
        let start = (i * width + j) * BYTES_PER_PIXEL;
        &pixels[start..start + BYTES_PER_PIXEL]
    }

    #[test]
    fn test_render_single_sample() {
        let scene = scene();
        let tracer = RayTracer::new(&scene);
        let options = RenderOptions {
            width: 5,
            height: 5,
            samples: 1,
            seed: 0,
        };
        let progress = AtomicUsize::new(0);
        let pixels = render(&tracer, &camera(), &options, &progress).unwrap();
        assert_eq!(pixels.len(), 5 * 5 * 3);
        assert_eq!(progress.load(Ordering::Relaxed), 25);
        // Centre pixel faces the sphere head on: emission plus full diffuse.
        assert_eq!(pixel(&pixels, 5, 2, 2), &[255, 153, 153]);
        assert_eq!(pixel(&pixels, 5, 0, 0), &[0, 0, 255]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let scene = scene();
        let tracer = RayTracer::new(&scene);
        let options = RenderOptions {
            width: 8,
            height: 6,
            samples: 4,
            seed: 11,
        };
        let a = render(&tracer, &camera(), &options, &AtomicUsize::new(0)).unwrap();
        let b = render(&tracer, &camera(), &options, &AtomicUsize::new(0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_rejects_empty_image() {
        let scene = scene();
        let tracer = RayTracer::new(&scene);
        let progress = AtomicUsize::new(0);
        for options in &[
            RenderOptions {
                width: 0,
                ..RenderOptions::default()
            },
            RenderOptions {
                samples: 0,
                ..RenderOptions::default()
            },
        ] {
            assert!(render(&tracer, &camera(), options, &progress).is_err());
        }
        assert_eq!(progress.load(Ordering::Relaxed), 0);
    }
}
