// Provides basic types.

use super::error::*;
use super::fp::*;
use std::ops::Deref;
use ultraviolet::DVec3;

pub type Point3 = DVec3;
pub type Vec3 = DVec3;

/// A unit-length vector. Construction from the zero vector fails, so a
/// `Direction` can always be used as a ray direction or a surface normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Direction(Vec3);

impl Direction {
    pub fn new(v: Vec3) -> Result<Direction> {
        let mag = v.mag();
        if is_zero(mag) || !mag.is_finite() {
            return invalid(format!("zero-length vector {:?}", v));
        }
        Ok(Direction(v / mag))
    }

    pub fn new_xyz(x: f64, y: f64, z: f64) -> Result<Direction> {
        Direction::new(Vec3::new(x, y, z))
    }

    pub fn into_inner(self) -> Vec3 {
        self.0
    }
}

impl Deref for Direction {
    type Target = Vec3;

    fn deref(&self) -> &Vec3 {
        &self.0
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Direction,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vec3) -> Result<Ray> {
        Ok(Ray {
            origin,
            direction: Direction::new(direction)?,
        })
    }

    /// Builds a secondary ray leaving a surface at `point`. The origin is
    /// moved by [`DELTA`] along `normal`, towards the side `direction`
    /// points to.
    pub fn offset(point: Point3, direction: Vec3, normal: Vec3) -> Result<Ray> {
        let nd = align_zero(direction.dot(normal));
        let origin = if nd == 0. {
            point
        } else if nd > 0. {
            point + normal * DELTA
        } else {
            point - normal * DELTA
        };
        Ray::new(origin, direction)
    }

    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + *self.direction * t
    }

    pub fn inv_direction(&self) -> Vec3 {
        Vec3::one() / *self.direction
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X = 0,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// component returns the coordinate of `v` along `axis`.
#[inline]
pub fn component(v: Vec3, axis: Axis) -> f64 {
    match axis {
        Axis::X => v.x,
        Axis::Y => v.y,
        Axis::Z => v.z,
    }
}

/// any_orthogonal returns some unit vector orthogonal to `v`.
pub fn any_orthogonal(v: &Direction) -> Vec3 {
    let helper = if v.x.abs() < 0.9 {
        Vec3::unit_x()
    } else {
        Vec3::unit_y()
    };
    v.cross(helper).normalized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::*;

    #[test]
    fn test_direction_zero_rejected() {
        assert!(Direction::new(Vec3::zero()).is_err());
        assert!(Ray::new(Point3::zero(), Vec3::zero()).is_err());
    }

    #[test]
    fn test_direction_normalized() {
        let mut rng = RttRng::seed_from_u64(7);
        for _ in 0..100 {
            let v = Vec3::gen_uniform_random_in_unit_cube(&mut rng);
            let d = Direction::new(v).unwrap();
            assert!((d.mag() - 1.).abs() < 1e-10);
            let scaled = Direction::new(v * rng.gen_range(0.01_f64..100.)).unwrap();
            assert!((*d - *scaled).mag() < 1e-10);
        }
    }

    #[test]
    fn test_ray_offset_follows_direction_side() {
        let n = Vec3::unit_z();
        let out = Ray::offset(Point3::zero(), Vec3::new(0., 1., 1.), n).unwrap();
        assert!((out.origin.z - DELTA).abs() < 1e-15);
        let inward = Ray::offset(Point3::zero(), Vec3::new(0., 1., -1.), n).unwrap();
        assert!((inward.origin.z + DELTA).abs() < 1e-15);
        let grazing = Ray::offset(Point3::zero(), Vec3::unit_x(), n).unwrap();
        assert_eq!(grazing.origin, Point3::zero());
    }

    #[test]
    fn test_any_orthogonal() {
        for v in &[Vec3::unit_x(), Vec3::unit_y(), Vec3::new(1., 2., 3.)] {
            let d = Direction::new(*v).unwrap();
            let o = any_orthogonal(&d);
            assert!(o.dot(*d).abs() < 1e-12);
            assert!((o.mag() - 1.).abs() < 1e-12);
        }
    }
}
