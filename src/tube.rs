//! Infinite cylinders around an axis ray.

use super::acceleration::*;
use super::error::*;
use super::fp::*;
use super::hittable::*;
use super::types::*;

#[derive(Clone, Copy, Debug)]
pub struct Tube {
    pub axis: Ray,
    pub radius: f64,
}

impl Tube {
    pub fn new(axis: Ray, radius: f64) -> Result<Tube> {
        if align_zero(radius) <= 0. {
            return invalid(format!("tube radius must be positive, got {}", radius));
        }
        Ok(Tube { axis, radius })
    }

    /// Coordinate of `p` along the axis, measured from the axis origin.
    pub(crate) fn axial(&self, p: Point3) -> f64 {
        (p - self.axis.origin).dot(*self.axis.direction)
    }

    /// Roots of the lateral surface quadratic, unfiltered and ascending.
    pub(crate) fn lateral_roots(&self, r: &Ray) -> Option<(f64, f64)> {
        let d = *self.axis.direction;
        let v = *r.direction;
        let oc = r.origin - self.axis.origin;

        // Components orthogonal to the axis.
        let v_perp = v - d * v.dot(d);
        let oc_perp = oc - d * oc.dot(d);

        let a = v_perp.mag_sq();
        // Parallel to the axis: either always inside or always outside.
        if is_zero(a) {
            return None;
        }
        let half_b = oc_perp.dot(v_perp);
        let c = oc_perp.mag_sq() - self.radius * self.radius;
        let discriminant = align_zero(half_b * half_b - a * c);
        if discriminant <= 0. {
            return None;
        }
        let sqrt_disc = discriminant.sqrt();
        Some(((-half_b - sqrt_disc) / a, (-half_b + sqrt_disc) / a))
    }
}

impl Intersectable for Tube {
    fn normal_at(&self, p: Point3) -> Vec3 {
        let s = self.axial(p);
        let o = if is_zero(s) {
            self.axis.origin
        } else {
            self.axis.point_at(s)
        };
        (p - o).normalized()
    }

    fn intersect(&self, r: &Ray, max_distance: f64) -> Roots {
        let mut roots = Roots::new();
        if let Some((t1, t2)) = self.lateral_roots(r) {
            push_root(&mut roots, t1, max_distance);
            push_root(&mut roots, t2, max_distance);
        }
        roots
    }

    fn aabb(&self) -> Option<Aabb> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z_tube() -> Tube {
        Tube::new(
            Ray::new(Point3::zero(), Vec3::unit_z()).unwrap(),
            5.,
        )
        .unwrap()
    }

    #[test]
    fn test_ray_tube_perpendicular() {
        let r = Ray::new(Point3::new(-10., 0., 3.), Vec3::new(1., 0., 0.)).unwrap();
        let roots = z_tube().intersect(&r, f64::INFINITY);
        assert_eq!(roots.len(), 2);
        assert!((roots[0] - 5.).abs() < 1e-10);
        assert!((roots[1] - 15.).abs() < 1e-10);
    }

    #[test]
    fn test_ray_tube_parallel_axis() {
        let r = Ray::new(Point3::new(2., 0., -10.), Vec3::new(0., 0., 1.)).unwrap();
        assert!(z_tube().intersect(&r, f64::INFINITY).is_empty());
    }

    #[test]
    fn test_ray_tube_miss() {
        let r = Ray::new(Point3::new(-10., 10., 0.), Vec3::new(1., 0., 0.)).unwrap();
        assert!(z_tube().intersect(&r, f64::INFINITY).is_empty());
    }

    #[test]
    fn test_normal() {
        let n = z_tube().normal_at(Point3::new(0., 5., 7.));
        assert!((n - Vec3::unit_y()).mag() < 1e-12);
        // Point level with the axis origin.
        let n = z_tube().normal_at(Point3::new(-5., 0., 0.));
        assert!((n + Vec3::unit_x()).mag() < 1e-12);
    }
}
