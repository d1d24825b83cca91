//! Finite cylinders closed by two disk caps.

use super::acceleration::*;
use super::error::*;
use super::fp::*;
use super::hittable::*;
use super::tube::*;
use super::types::*;

/// A tube cut at axial coordinates `0` and `height` and closed by two
/// disks. The bottom cap faces `-axis`, the top cap `+axis`.
#[derive(Clone, Copy, Debug)]
pub struct Cylinder {
    pub tube: Tube,
    pub height: f64,
    aabb: Aabb,
}

impl Cylinder {
    pub fn new(axis: Ray, radius: f64, height: f64) -> Result<Cylinder> {
        if align_zero(height) <= 0. {
            return invalid(format!("cylinder height must be positive, got {}", height));
        }
        let tube = Tube::new(axis, radius)?;
        let d = *axis.direction;
        // Half extent of a disk of the given radius orthogonal to `d`.
        let disk = Vec3::new(
            radius * (1. - d.x * d.x).max(0.).sqrt(),
            radius * (1. - d.y * d.y).max(0.).sqrt(),
            radius * (1. - d.z * d.z).max(0.).sqrt(),
        );
        let bottom = axis.origin;
        let top = axis.point_at(height);
        let aabb = Aabb::surrounding(
            Aabb::new(bottom - disk, bottom + disk),
            Aabb::new(top - disk, top + disk),
        );
        Ok(Cylinder { tube, height, aabb })
    }

    pub fn radius(&self) -> f64 {
        self.tube.radius
    }

    fn push_cap(&self, r: &Ray, center: Point3, max_distance: f64, roots: &mut Roots) {
        let d = *self.tube.axis.direction;
        let denom = align_zero(d.dot(*r.direction));
        if denom == 0. {
            return;
        }
        let t = d.dot(center - r.origin) / denom;
        let p = r.point_at(t);
        let radius_sq = self.tube.radius * self.tube.radius;
        if align_zero(radius_sq - (p - center).mag_sq()) > 0. {
            push_root(roots, t, max_distance);
        }
    }
}

impl Intersectable for Cylinder {
    fn normal_at(&self, p: Point3) -> Vec3 {
        let d = *self.tube.axis.direction;
        let s = self.tube.axial(p);
        if is_zero(s) {
            -d
        } else if is_zero(s - self.height) {
            d
        } else {
            self.tube.normal_at(p)
        }
    }

    fn intersect(&self, r: &Ray, max_distance: f64) -> Roots {
        let mut roots = Roots::new();
        if let Some((t1, t2)) = self.tube.lateral_roots(r) {
            for &t in &[t1, t2] {
                let s = self.tube.axial(r.point_at(t));
                if align_zero(s) > 0. && align_zero(s - self.height) < 0. {
                    push_root(&mut roots, t, max_distance);
                }
            }
        }
        let bottom = self.tube.axis.origin;
        let top = self.tube.axis.point_at(self.height);
        self.push_cap(r, bottom, max_distance, &mut roots);
        self.push_cap(r, top, max_distance, &mut roots);
        sort_roots(&mut roots);
        roots
    }

    fn aabb(&self) -> Option<Aabb> {
        Some(self.aabb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Radius 1, from z = 0 to z = 2.
    fn cylinder() -> Cylinder {
        Cylinder::new(Ray::new(Point3::zero(), Vec3::unit_z()).unwrap(), 1., 2.).unwrap()
    }

    fn ray(o: (f64, f64, f64), d: (f64, f64, f64)) -> Ray {
        Ray::new(Point3::new(o.0, o.1, o.2), Vec3::new(d.0, d.1, d.2)).unwrap()
    }

    #[test]
    fn test_rejects_degenerate() {
        let axis = Ray::new(Point3::zero(), Vec3::unit_z()).unwrap();
        assert!(Cylinder::new(axis, 1., 0.).is_err());
        assert!(Cylinder::new(axis, 0., 1.).is_err());
    }

    #[test]
    fn test_side_hits() {
        let roots = cylinder().intersect(&ray((-3., 0., 1.), (1., 0., 0.)), f64::INFINITY);
        assert_eq!(roots.len(), 2);
        assert!((roots[0] - 2.).abs() < 1e-10);
        assert!((roots[1] - 4.).abs() < 1e-10);
    }

    #[test]
    fn test_side_above_height_misses() {
        let roots = cylinder().intersect(&ray((-3., 0., 3.), (1., 0., 0.)), f64::INFINITY);
        assert!(roots.is_empty());
    }

    #[test]
    fn test_through_both_caps() {
        let roots = cylinder().intersect(&ray((0.5, 0., -1.), (0., 0., 1.)), f64::INFINITY);
        assert_eq!(roots.len(), 2);
        assert!((roots[0] - 1.).abs() < 1e-10);
        assert!((roots[1] - 3.).abs() < 1e-10);
    }

    #[test]
    fn test_cap_then_side() {
        // Enters through the top cap at (0, 0, 2) and leaves through the side.
        let c = cylinder();
        let r = ray((-1., 0., 3.), (1., 0., -1.));
        let roots = c.intersect(&r, f64::INFINITY);
        assert_eq!(roots.len(), 2);
        let entry = r.point_at(roots[0]);
        assert!((entry - Point3::new(0., 0., 2.)).mag() < 1e-10);
        let exit = r.point_at(roots[1]);
        assert!((exit - Point3::new(1., 0., 1.)).mag() < 1e-10);
        assert!((c.normal_at(entry) - Vec3::unit_z()).mag() < 1e-12);
        assert!((c.normal_at(exit) - Vec3::unit_x()).mag() < 1e-12);
    }

    #[test]
    fn test_parallel_outside_misses() {
        let roots = cylinder().intersect(&ray((2., 0., -1.), (0., 0., 1.)), f64::INFINITY);
        assert!(roots.is_empty());
    }

    #[test]
    fn test_normals() {
        let c = cylinder();
        assert!((c.normal_at(Point3::new(0.3, 0.2, 0.)) + Vec3::unit_z()).mag() < 1e-12);
        assert!((c.normal_at(Point3::new(0., -1., 1.5)) + Vec3::unit_y()).mag() < 1e-12);
    }

    #[test]
    fn test_aabb() {
        let bb = cylinder().aabb().unwrap();
        assert!((bb.minimum - Point3::new(-1., -1., 0.)).mag() < 1e-12);
        assert!((bb.maximum - Point3::new(1., 1., 2.)).mag() < 1e-12);
    }
}
