//! Convex planar polygons, triangles included.

use super::acceleration::*;
use super::error::*;
use super::fp::*;
use super::hittable::*;
use super::plane::*;
use super::types::*;

#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<Point3>,
    plane: Plane,
    aabb: Aabb,
}

impl Polygon {
    /// Builds a convex polygon from its vertices in boundary order. The
    /// vertices must be coplanar, with no two consecutive ones coincident
    /// or collinear with their neighbour.
    pub fn new(vertices: Vec<Point3>) -> Result<Polygon> {
        if vertices.len() < 3 {
            return invalid(format!(
                "a polygon needs at least 3 vertices, got {}",
                vertices.len()
            ));
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        let n = *plane.normal;

        if vertices.len() > 3 {
            if let Some(v) = vertices.iter().find(|&&v| !is_zero((v - vertices[0]).dot(n))) {
                return invalid(format!("polygon vertex {:?} is off the polygon plane", v));
            }
        }

        // Every turn along the boundary must go the same way.
        let count = vertices.len();
        let mut orientation = 0.;
        for i in 0..count {
            let prev = vertices[(i + count - 1) % count];
            let cur = vertices[i];
            let next = vertices[(i + 1) % count];
            let turn = align_zero((cur - prev).cross(next - cur).dot(n));
            if turn == 0. {
                return invalid(format!("polygon is degenerate at vertex {:?}", cur));
            }
            if orientation == 0. {
                orientation = turn.signum();
            } else if turn.signum() != orientation {
                return invalid("polygon is not convex");
            }
        }

        let aabb = Aabb::from_points(vertices.iter().copied())
            .ok_or_else(|| Error::InvalidArgument("polygon has no vertices".into()))?;
        Ok(Polygon {
            vertices,
            plane,
            aabb,
        })
    }

    pub fn triangle(a: Point3, b: Point3, c: Point3) -> Result<Polygon> {
        Polygon::new(vec![a, b, c])
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Same-side test of the ray direction against the fan of planes
    /// spanned by the ray origin and each edge. Rays grazing an edge or a
    /// vertex are rejected.
    fn inside(&self, r: &Ray) -> bool {
        let count = self.vertices.len();
        let mut sign = 0.;
        for i in 0..count {
            let v1 = self.vertices[i] - r.origin;
            let v2 = self.vertices[(i + 1) % count] - r.origin;
            let n = v1.cross(v2);
            if is_zero(n.mag()) {
                return false;
            }
            let s = align_zero(r.direction.dot(n.normalized()));
            if s == 0. {
                return false;
            }
            if sign == 0. {
                sign = s.signum();
            } else if s.signum() != sign {
                return false;
            }
        }
        true
    }
}

impl Intersectable for Polygon {
    fn normal_at(&self, _p: Point3) -> Vec3 {
        *self.plane.normal
    }

    fn intersect(&self, r: &Ray, max_distance: f64) -> Roots {
        let mut roots = Roots::new();
        if let Some(t) = self.plane.hit_t(r) {
            if self.inside(r) {
                push_root(&mut roots, t, max_distance);
            }
        }
        roots
    }

    fn aabb(&self) -> Option<Aabb> {
        Some(self.aabb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn triangle() -> Polygon {
        Polygon::triangle(p(0., 0., 1.), p(1., 0., 0.), p(0., 1., 0.)).unwrap()
    }

    #[test]
    fn test_rejects_degenerate() {
        assert!(Polygon::new(vec![p(0., 0., 0.), p(1., 0., 0.)]).is_err());
        assert!(Polygon::triangle(p(0., 0., 0.), p(0., 0., 0.), p(1., 0., 0.)).is_err());
        assert!(Polygon::triangle(p(0., 0., 0.), p(1., 1., 1.), p(2., 2., 2.)).is_err());
    }

    #[test]
    fn test_rejects_non_planar_and_concave() {
        let off_plane = vec![p(0., 0., 0.), p(1., 0., 0.), p(1., 1., 0.), p(0., 1., 0.5)];
        assert!(Polygon::new(off_plane).is_err());
        let concave = vec![p(0., 0., 0.), p(2., 0., 0.), p(1., 0.5, 0.), p(2., 2., 0.), p(0., 2., 0.)];
        assert!(Polygon::new(concave).is_err());
        let square = vec![p(0., 0., 0.), p(1., 0., 0.), p(1., 1., 0.), p(0., 1., 0.)];
        assert!(Polygon::new(square).is_ok());
    }

    #[test]
    fn test_interior_hits_match_plane() {
        let t = triangle();
        let mut rng = RttRng::seed_from_u64(5);
        for _ in 0..200 {
            // Random strictly interior point through barycentric weights.
            let (a, b) = (rng.gen_range(0.05_f64..0.9), rng.gen_range(0.05_f64..0.9));
            if a + b > 0.95 {
                continue;
            }
            let target = p(0., 0., 1.) * (1. - a - b) + p(1., 0., 0.) * a + p(0., 1., 0.) * b;
            let origin = Vec3::gen_uniform_random_in_unit_cube(&mut rng) + p(3., 3., 3.);
            let r = Ray::new(origin, target - origin).unwrap();
            let roots = t.intersect(&r, f64::INFINITY);
            assert_eq!(roots.len(), 1);
            let expected = t.plane().hit_t(&r).unwrap();
            assert!((roots[0] - expected).abs() < 1e-10);
            assert!((r.point_at(roots[0]) - target).mag() < 1e-9);
        }
    }

    #[test]
    fn test_outside_misses() {
        let r = Ray::new(p(2., 2., 2.), Vec3::new(-1., -1., -3.)).unwrap();
        assert!(triangle().plane().hit_t(&r).is_some());
        assert!(triangle().intersect(&r, f64::INFINITY).is_empty());
    }

    #[test]
    fn test_vertex_and_edge_graze_miss() {
        let t = triangle();
        let origin = p(1., 1., 1.);
        let through_vertex = Ray::new(origin, p(1., 0., 0.) - origin).unwrap();
        assert!(t.intersect(&through_vertex, f64::INFINITY).is_empty());
        let through_edge = Ray::new(origin, p(0.5, 0.5, 0.) - origin).unwrap();
        assert!(t.intersect(&through_edge, f64::INFINITY).is_empty());
    }

    #[test]
    fn test_ray_from_vertex_is_not_a_hit() {
        // The ray leaves the vertex (0, 0, 1): the plane hit is at t = 0,
        // which lies inside the self-intersection tolerance.
        let r = Ray::new(p(0., 0., 1.), Vec3::new(-0.5, 0., -1.)).unwrap();
        assert!(triangle().intersect(&r, f64::INFINITY).is_empty());
    }

    #[test]
    fn test_quad_hit() {
        let square = Polygon::new(vec![
            p(-1., -1., 0.),
            p(1., -1., 0.),
            p(1., 1., 0.),
            p(-1., 1., 0.),
        ])
        .unwrap();
        let r = Ray::new(p(0.5, 0.5, 4.), Vec3::new(0., 0., -1.)).unwrap();
        let roots = square.intersect(&r, f64::INFINITY);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 4.).abs() < 1e-12);
    }
}
