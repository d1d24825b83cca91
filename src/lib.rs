//! A recursive Phong ray tracer over planes, spheres, tubes, capped
//! cylinders and convex polygons.
//!
//! Geometries live in one [`scene::Geometries`] arena. Closest-hit and
//! shadow queries either scan the arena or walk a uniform voxel grid built
//! over it with a 3-D DDA; both give the same answers.
//!
//! ```no_run
//! use voxtrace::*;
//!
//! # fn main() -> voxtrace::Result<()> {
//! let scene = Scene::builder("one ball")
//!     .geometry(Geometry::new(Sphere::new(Point3::new(0., 0., -5.), 1.)?)
//!         .with_material(Material::new().with_kd(0.8)))
//!     .light(PointLight::new(Color::ONE, Point3::new(0., 5., 0.)))
//!     .grid(Some(GridResolution::Auto))
//!     .build()?;
//! let camera = Camera::new(Point3::zero(), Vec3::new(0., 0., -1.), Vec3::unit_y())?;
//! let color = RayTracer::new(&scene).trace_ray(&camera.construct_ray(1, 1, 0, 0)?)?;
//! # Ok(())
//! # }
//! ```

pub mod acceleration;
pub mod camera;
pub mod color;
pub mod cylinder;
pub mod demo;
pub mod error;
pub mod fp;
pub mod hittable;
pub mod lights;
pub mod material;
pub mod plane;
pub mod polygon;
pub mod render;
pub mod rng;
pub mod sampler;
pub mod scene;
pub mod sphere;
pub mod threadpool;
pub mod tracer;
pub mod tube;
pub mod types;

pub use camera::Camera;
pub use color::Color;
pub use cylinder::Cylinder;
pub use error::{Error, Result};
pub use hittable::{GeoPoint, Geometry, Intersectable, Shape};
pub use lights::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::Material;
pub use plane::Plane;
pub use polygon::Polygon;
pub use render::{render, RenderOptions};
pub use sampler::Sampler;
pub use scene::{Geometries, GridResolution, Scene, SceneBuilder};
pub use sphere::Sphere;
pub use tracer::RayTracer;
pub use tube::Tube;
pub use types::{Direction, Point3, Ray, Vec3};
