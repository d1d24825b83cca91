use super::error::*;
use super::fp::*;
use super::types::*;

/// A pinhole camera shooting rays from `location` through a view plane
/// centred `distance` away along `v_to`.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    location: Point3,
    v_to: Direction,
    v_up: Direction,
    v_right: Vec3,
    width: f64,
    height: f64,
    distance: f64,
}

impl Camera {
    /// `v_to` and `v_up` must be orthogonal. The right vector completes a
    /// right-handed basis.
    pub fn new(location: Point3, v_to: Vec3, v_up: Vec3) -> Result<Camera> {
        let v_to = Direction::new(v_to)?;
        let v_up = Direction::new(v_up)?;
        if !is_zero(v_to.dot(*v_up)) {
            return invalid(format!(
                "camera vectors {:?} and {:?} are not orthogonal",
                *v_to, *v_up
            ));
        }
        Ok(Camera {
            location,
            v_to,
            v_up,
            v_right: v_to.cross(*v_up),
            width: 1.,
            height: 1.,
            distance: 1.,
        })
    }

    /// A camera at `location` aimed at `target`, with `up` only giving the
    /// approximate vertical.
    pub fn look_at(location: Point3, target: Point3, up: Vec3) -> Result<Camera> {
        let v_to = target - location;
        let v_right = v_to.cross(up);
        if is_zero(v_right.mag()) {
            return invalid("camera up vector is parallel to the view direction");
        }
        Camera::new(location, v_to, v_right.cross(v_to))
    }

    pub fn with_view_plane(mut self, width: f64, height: f64) -> Result<Camera> {
        if align_zero(width) <= 0. || align_zero(height) <= 0. {
            return invalid(format!("view plane {}x{} must be positive", width, height));
        }
        self.width = width;
        self.height = height;
        Ok(self)
    }

    pub fn with_distance(mut self, distance: f64) -> Result<Camera> {
        if align_zero(distance) <= 0. {
            return invalid(format!("view plane distance must be positive, got {}", distance));
        }
        self.distance = distance;
        Ok(self)
    }

    pub fn location(&self) -> Point3 {
        self.location
    }

    /// Ray through the centre of pixel `(j, i)` of an `nx` by `ny` image,
    /// `i` counting rows from the top.
    pub fn construct_ray(&self, nx: usize, ny: usize, j: usize, i: usize) -> Result<Ray> {
        self.construct_ray_at(nx, ny, j as f64 + 0.5, i as f64 + 0.5)
    }

    /// Ray through the continuous pixel coordinates `(x, y)`; pixel `(j, i)`
    /// covers `[j, j+1) × [i, i+1)`.
    pub fn construct_ray_at(&self, nx: usize, ny: usize, x: f64, y: f64) -> Result<Ray> {
        if nx == 0 || ny == 0 {
            return invalid(format!("image resolution {}x{} must be positive", nx, ny));
        }
        let rx = self.width / nx as f64;
        let ry = self.height / ny as f64;
        let xj = (x - nx as f64 / 2.) * rx;
        let yi = -(y - ny as f64 / 2.) * ry;

        let mut p = self.location + *self.v_to * self.distance;
        if xj != 0. {
            p += self.v_right * xj;
        }
        if yi != 0. {
            p += *self.v_up * yi;
        }
        Ray::new(self.location, p - self.location)
    }
}
