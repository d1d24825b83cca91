#![allow(clippy::suspicious_operation_groupings)]

use super::acceleration::*;
use super::error::*;
use super::fp::*;
use super::hittable::*;
use super::types::*;

#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub center: Point3,
    pub radius: f64,
    aabb: Aabb,
}

impl Sphere {
    pub fn new(center: Point3, radius: f64) -> Result<Sphere> {
        if align_zero(radius) <= 0. {
            return invalid(format!("sphere radius must be positive, got {}", radius));
        }
        Ok(Sphere {
            center,
            radius,
            aabb: Aabb {
                minimum: center - Vec3::broadcast(radius),
                maximum: center + Vec3::broadcast(radius),
            },
        })
    }
}

impl Intersectable for Sphere {
    fn normal_at(&self, p: Point3) -> Vec3 {
        (p - self.center).normalized()
    }

    fn intersect(&self, r: &Ray, max_distance: f64) -> Roots {
        let mut roots = Roots::new();
        let oc = r.origin - self.center;
        // The direction has unit length, so a == 1.
        let half_b = oc.dot(*r.direction);
        let c = oc.mag_sq() - (self.radius * self.radius);
        let discriminant = align_zero((half_b * half_b) - c);
        // A tangent ray touches without entering.
        if discriminant <= 0. {
            return roots;
        }
        let discriminant_sqrt = discriminant.sqrt();
        push_root(&mut roots, -half_b - discriminant_sqrt, max_distance);
        push_root(&mut roots, -half_b + discriminant_sqrt, max_distance);
        roots
    }

    fn aabb(&self) -> Option<Aabb> {
        Some(self.aabb)
    }
}
