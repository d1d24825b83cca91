use super::acceleration::*;
use super::color::*;
use super::cylinder::*;
use super::fp::*;
use super::material::*;
use super::plane::*;
use super::polygon::*;
use super::sphere::*;
use super::tube::*;
use super::types::*;
use arrayvec::ArrayVec;

/// Ray parameters of the intersections of one ray with one shape, sorted
/// ascending. No convex shape is crossed more than twice; the extra slots
/// absorb cylinder rim hits that land on both a cap and the side.
pub type Roots = ArrayVec<f64, 4>;

/// The capability every shape provides to the aggregate and the grid.
pub trait Intersectable {
    /// Unit normal at a point on the surface, outward where a side is
    /// well-defined.
    fn normal_at(&self, p: Point3) -> Vec3;

    /// Intersections with `t` in `(ZERO_TOLERANCE, max_distance]`.
    fn intersect(&self, r: &Ray, max_distance: f64) -> Roots;

    /// Bounding box, or `None` for unbounded shapes.
    fn aabb(&self) -> Option<Aabb>;
}

pub enum Shape {
    Plane(Plane),
    Sphere(Sphere),
    Tube(Tube),
    Cylinder(Cylinder),
    Polygon(Polygon),
}

impl Shape {
    fn as_intersectable(&self) -> &dyn Intersectable {
        match self {
            Shape::Plane(s) => s,
            Shape::Sphere(s) => s,
            Shape::Tube(s) => s,
            Shape::Cylinder(s) => s,
            Shape::Polygon(s) => s,
        }
    }
}

macro_rules! impl_from_shape {
    ($($t:ident),*) => {
        $(impl From<$t> for Shape {
            fn from(s: $t) -> Shape {
                Shape::$t(s)
            }
        })*
    };
}

impl_from_shape!(Plane, Sphere, Tube, Cylinder, Polygon);

/// A shape placed in a scene, with the surface it is made of.
pub struct Geometry {
    pub shape: Shape,
    pub material: Material,
    pub emission: Color,
}

impl Geometry {
    pub fn new<S: Into<Shape>>(shape: S) -> Geometry {
        Geometry {
            shape: shape.into(),
            material: Material::default(),
            emission: Color::BLACK,
        }
    }

    pub fn with_material(mut self, material: Material) -> Geometry {
        self.material = material;
        self
    }

    pub fn with_emission(mut self, emission: Color) -> Geometry {
        self.emission = emission;
        self
    }

    pub fn normal_at(&self, p: Point3) -> Vec3 {
        self.shape.as_intersectable().normal_at(p)
    }

    pub fn aabb(&self) -> Option<Aabb> {
        self.shape.as_intersectable().aabb()
    }

    /// All intersections of `r` up to `max_distance`, nearest first.
    pub fn intersect<'scene>(&'scene self, r: &Ray, max_distance: f64) -> Vec<GeoPoint<'scene>> {
        self.shape
            .as_intersectable()
            .intersect(r, max_distance)
            .into_iter()
            .map(|t| GeoPoint::new(self, r, t))
            .collect()
    }

    /// The nearest intersection of `r` up to `max_distance`.
    pub fn intersect_closest<'scene>(
        &'scene self,
        r: &Ray,
        max_distance: f64,
    ) -> Option<GeoPoint<'scene>> {
        self.shape
            .as_intersectable()
            .intersect(r, max_distance)
            .first()
            .map(|&t| GeoPoint::new(self, r, t))
    }
}

/// An intersection bound to the geometry that produced it.
#[derive(Clone, Copy)]
pub struct GeoPoint<'scene> {
    pub geometry: &'scene Geometry,
    pub point: Point3,
    pub t: f64,
}

impl<'scene> GeoPoint<'scene> {
    fn new(geometry: &'scene Geometry, r: &Ray, t: f64) -> GeoPoint<'scene> {
        GeoPoint {
            geometry,
            point: r.point_at(t),
            t,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.geometry.normal_at(self.point)
    }

    pub fn is_same_geometry(&self, other: &GeoPoint) -> bool {
        std::ptr::eq(self.geometry, other.geometry)
    }
}

impl std::fmt::Debug for GeoPoint<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoPoint")
            .field("geometry", &(self.geometry as *const Geometry))
            .field("point", &self.point)
            .field("t", &self.t)
            .finish()
    }
}

/// push_root appends `t` to `roots` when it lies in the accepted range.
pub(crate) fn push_root(roots: &mut Roots, t: f64, max_distance: f64) {
    if align_zero(t) > 0. && align_zero(t - max_distance) <= 0. {
        let _ = roots.try_push(t);
    }
}

pub(crate) fn sort_roots(roots: &mut Roots) {
    roots.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
}
