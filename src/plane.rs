//! Infinite planes.

use super::acceleration::*;
use super::error::*;
use super::fp::*;
use super::hittable::*;
use super::types::*;

#[derive(Clone, Copy, Debug)]
pub struct Plane {
    pub q0: Point3,
    pub normal: Direction,
}

impl Plane {
    pub fn new(q0: Point3, normal: Vec3) -> Result<Plane> {
        Ok(Plane {
            q0,
            normal: Direction::new(normal)?,
        })
    }

    /// Builds the plane through three points. Coincident or collinear
    /// points do not define a plane.
    pub fn from_points(p0: Point3, p1: Point3, p2: Point3) -> Result<Plane> {
        if p0 == p1 || p1 == p2 || p0 == p2 {
            return invalid("plane points must be distinct");
        }
        let normal = (p1 - p0).cross(p2 - p0);
        if is_zero(normal.mag()) {
            return invalid("plane points must not be collinear");
        }
        Plane::new(p0, normal)
    }

    /// Ray parameter of the hit with the supporting plane, if any.
    pub(crate) fn hit_t(&self, r: &Ray) -> Option<f64> {
        let denom = align_zero(self.normal.dot(*r.direction));
        if denom == 0. {
            return None;
        }
        let t = align_zero(self.normal.dot(self.q0 - r.origin) / denom);
        if t > 0. {
            Some(t)
        } else {
            None
        }
    }
}

impl Intersectable for Plane {
    fn normal_at(&self, _p: Point3) -> Vec3 {
        *self.normal
    }

    fn intersect(&self, r: &Ray, max_distance: f64) -> Roots {
        let mut roots = Roots::new();
        if let Some(t) = self.hit_t(r) {
            push_root(&mut roots, t, max_distance);
        }
        roots
    }

    fn aabb(&self) -> Option<Aabb> {
        None
    }
}
