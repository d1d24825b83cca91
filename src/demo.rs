//! Ready-made scenes for the command line renderer and the benchmarks.

use super::camera::*;
use super::color::*;
use super::cylinder::*;
use super::error::*;
use super::hittable::*;
use super::lights::*;
use super::material::*;
use super::plane::*;
use super::polygon::*;
use super::rng::*;
use super::scene::*;
use super::sphere::*;
use super::tube::*;
use super::types::*;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoScene {
    /// Every shape, material effect and light type once.
    Showcase,
    /// A floor covered with hundreds of small random spheres.
    Random,
}

impl FromStr for DemoScene {
    type Err = Error;

    fn from_str(s: &str) -> Result<DemoScene> {
        match s {
            "showcase" => Ok(DemoScene::Showcase),
            "random" => Ok(DemoScene::Random),
            _ => invalid(format!("unknown scene '{}'", s)),
        }
    }
}

pub fn demo_scene(
    kind: DemoScene,
    aspect: f64,
    grid: Option<GridResolution>,
    rng: &mut RttRng,
) -> Result<(Scene, Camera)> {
    match kind {
        DemoScene::Showcase => showcase_scene(aspect, grid),
        DemoScene::Random => random_scene(aspect, grid, rng),
    }
}

// View plane one unit away, sized for a vertical field of view in degrees.
fn camera(from: Point3, at: Point3, vfov: f64, aspect: f64) -> Result<Camera> {
    let height = 2. * (vfov.to_radians() / 2.).tan();
    Camera::look_at(from, at, Vec3::unit_y())?.with_view_plane(height * aspect, height)
}

pub fn showcase_scene(aspect: f64, grid: Option<GridResolution>) -> Result<(Scene, Camera)> {
    let floor = Material::new().with_kd(0.5).with_ks(0.2).with_shininess(20).with_kr(0.2);
    let glass = Material::new().with_kd(0.1).with_ks(0.8).with_shininess(200).with_kt(0.8);
    let mirror = Material::new().with_ks(0.5).with_shininess(300).with_kr(0.9);
    let brushed = Material::new()
        .with_kd(0.2)
        .with_ks(0.6)
        .with_shininess(60)
        .with_kr(0.6)
        .with_ksg(8.);
    let frosted = Material::new()
        .with_kd(0.1)
        .with_ks(0.3)
        .with_shininess(40)
        .with_kt(0.7)
        .with_kdg(6.);
    let matte = |r: f64, g: f64, b: f64| {
        Material::new()
            .with_kd_color(Color::new(r, g, b))
            .with_ks(0.3)
            .with_shininess(30)
    };

    let scene = Scene::builder("showcase")
        .background(Color::new(0.05, 0.07, 0.12))
        .ambient(AmbientLight::new(Color::ONE, 0.08))
        .grid(grid)
        .geometry(
            Geometry::new(Plane::new(Point3::zero(), Vec3::unit_y())?)
                .with_material(floor)
                .with_emission(Color::new(0.05, 0.05, 0.05)),
        )
        .geometry(
            Geometry::new(Sphere::new(Point3::new(0., 1., 0.), 1.)?)
                .with_material(glass)
                .with_emission(Color::new(0.02, 0.05, 0.1)),
        )
        .geometry(
            Geometry::new(Sphere::new(Point3::new(0., 1., 0.), 0.4)?)
                .with_material(matte(0.8, 0.2, 0.1)),
        )
        .geometry(Geometry::new(Sphere::new(Point3::new(-2.5, 1., -1.), 1.)?).with_material(mirror))
        .geometry(
            Geometry::new(Sphere::new(Point3::new(2.5, 0.7, -0.5), 0.7)?)
                .with_material(brushed)
                .with_emission(Color::new(0.1, 0.08, 0.02)),
        )
        .geometry(
            Geometry::new(Cylinder::new(
                Ray::new(Point3::new(1.2, 0., 2.), Vec3::unit_y())?,
                0.4,
                1.5,
            )?)
            .with_material(matte(0.2, 0.6, 0.3)),
        )
        .geometry(
            Geometry::new(Tube::new(
                Ray::new(Point3::new(0., 4., -6.), Vec3::unit_x())?,
                0.3,
            )?)
            .with_material(matte(0.6, 0.6, 0.7)),
        )
        .geometry(
            Geometry::new(Polygon::triangle(
                Point3::new(-1.5, 0.01, 2.5),
                Point3::new(-0.2, 0.01, 3.2),
                Point3::new(-0.8, 1.8, 2.),
            )?)
            .with_material(matte(0.9, 0.8, 0.2)),
        )
        .geometry(
            Geometry::new(Polygon::new(vec![
                Point3::new(-4., 0., -4.),
                Point3::new(4., 0., -4.),
                Point3::new(4., 3., -4.5),
                Point3::new(-4., 3., -4.5),
            ])?)
            .with_material(frosted),
        )
        .light(DirectionalLight::new(
            Color::new(0.3, 0.3, 0.25),
            Vec3::new(-1., -2., -1.),
        )?)
        .light(
            PointLight::new(Color::new(0.8, 0.6, 0.4), Point3::new(3., 5., 3.))
                .with_attenuation(1., 0.02, 0.005),
        )
        .light(
            SpotLight::new(
                Color::new(0.9, 0.9, 1.),
                Point3::new(-3., 6., 4.),
                Vec3::new(1., -2., -1.5),
            )?
            .with_attenuation(1., 0.01, 0.002)
            .with_narrow_beam(8),
        )
        .build()?;

    let camera = camera(Point3::new(0., 2.5, 9.), Point3::new(0., 1., 0.), 40., aspect)?;
    Ok((scene, camera))
}

pub fn random_scene(
    aspect: f64,
    grid: Option<GridResolution>,
    rng: &mut RttRng,
) -> Result<(Scene, Camera)> {
    let mut builder = Scene::builder("random")
        .background(Color::new(0.5, 0.7, 1.))
        .ambient(AmbientLight::new(Color::ONE, 0.1))
        .grid(grid)
        .geometry(
            Geometry::new(Plane::new(Point3::zero(), Vec3::unit_y())?)
                .with_material(Material::new().with_kd(0.5)),
        );

    for a in -11..11 {
        for b in -11..11 {
            let center = Point3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );
            if (center - Point3::new(4., 0.2, 0.)).mag() <= 0.9 {
                continue;
            }
            let choose_mat = rng.gen::<f64>();
            let material = if choose_mat < 0.8 {
                // Diffuse
                Material::new().with_kd_color(Color::new(
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                ))
            } else if choose_mat < 0.95 {
                // Metal
                Material::new()
                    .with_ks(0.5 * (1. + rng.gen::<f64>()))
                    .with_shininess(100)
                    .with_kr(0.5 * (1. + rng.gen::<f64>()))
                    .with_ksg(10. * rng.gen::<f64>())
            } else {
                // Glass
                Material::new().with_ks(0.8).with_shininess(200).with_kt(0.9)
            };
            builder = builder.geometry(Geometry::new(Sphere::new(center, 0.2)?).with_material(material));
        }
    }

    let scene = builder
        .geometry(
            Geometry::new(Sphere::new(Point3::new(0., 1., 0.), 1.)?)
                .with_material(Material::new().with_ks(0.8).with_shininess(200).with_kt(0.9)),
        )
        .geometry(
            Geometry::new(Sphere::new(Point3::new(-4., 1., 0.), 1.)?)
                .with_material(Material::new().with_kd_color(Color::new(0.4, 0.2, 0.1))),
        )
        .geometry(
            Geometry::new(Sphere::new(Point3::new(4., 1., 0.), 1.)?)
                .with_material(Material::new().with_ks(0.6).with_shininess(300).with_kr(0.7)),
        )
        .light(DirectionalLight::new(Color::new(0.9, 0.9, 0.8), Vec3::new(-1., -3., -2.))?)
        .build()?;

    let camera = camera(Point3::new(13., 2., 3.), Point3::zero(), 20., aspect)?;
    Ok((scene, camera))
}
