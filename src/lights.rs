//! Light sources.

use super::color::*;
use super::error::*;
use super::types::*;

/// Uniform light reaching every surface regardless of occlusion.
#[derive(Clone, Copy, Debug, Default)]
pub struct AmbientLight {
    pub intensity: Color,
    pub ka: Color,
}

impl AmbientLight {
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::BLACK,
        ka: Color::BLACK,
    };

    pub fn new(intensity: Color, ka: f64) -> AmbientLight {
        AmbientLight {
            intensity,
            ka: Color::broadcast(ka),
        }
    }

    pub fn intensity(&self) -> Color {
        self.intensity.scale(self.ka)
    }
}

pub trait LightSource {
    /// Intensity arriving at `p`, before any occlusion.
    fn intensity_at(&self, p: Point3) -> Color;

    /// Direction the light travels to reach `p`.
    fn incident(&self, p: Point3) -> Result<Direction>;

    /// Distance from `p` to the light; shadow rays stop there.
    fn distance(&self, p: Point3) -> f64;
}

/// A light infinitely far away, e.g. the sun.
#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    pub intensity: Color,
    pub direction: Direction,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vec3) -> Result<DirectionalLight> {
        Ok(DirectionalLight {
            intensity,
            direction: Direction::new(direction)?,
        })
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _p: Point3) -> Color {
        self.intensity
    }

    fn incident(&self, _p: Point3) -> Result<Direction> {
        Ok(self.direction)
    }

    fn distance(&self, _p: Point3) -> f64 {
        f64::INFINITY
    }
}

/// A light radiating from a point, fading with distance `d` by
/// `1 / (kc + kl·d + kq·d²)`.
#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Point3,
    pub kc: f64,
    pub kl: f64,
    pub kq: f64,
}

impl PointLight {
    pub fn new(intensity: Color, position: Point3) -> PointLight {
        PointLight {
            intensity,
            position,
            kc: 1.,
            kl: 0.,
            kq: 0.,
        }
    }

    pub fn with_attenuation(mut self, kc: f64, kl: f64, kq: f64) -> PointLight {
        self.kc = kc;
        self.kl = kl;
        self.kq = kq;
        self
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, p: Point3) -> Color {
        let d = self.distance(p);
        self.intensity
            .reduce(self.kc + self.kl * d + self.kq * d * d)
    }

    fn incident(&self, p: Point3) -> Result<Direction> {
        Direction::new(p - self.position)
    }

    fn distance(&self, p: Point3) -> f64 {
        (p - self.position).mag()
    }
}

/// A point light emitting mostly along `direction`. The beam narrows as
/// `narrow_beam` grows.
#[derive(Clone, Copy, Debug)]
pub struct SpotLight {
    pub point: PointLight,
    pub direction: Direction,
    pub narrow_beam: i32,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point3, direction: Vec3) -> Result<SpotLight> {
        Ok(SpotLight {
            point: PointLight::new(intensity, position),
            direction: Direction::new(direction)?,
            narrow_beam: 1,
        })
    }

    pub fn with_attenuation(mut self, kc: f64, kl: f64, kq: f64) -> SpotLight {
        self.point = self.point.with_attenuation(kc, kl, kq);
        self
    }

    pub fn with_narrow_beam(mut self, narrow_beam: i32) -> SpotLight {
        self.narrow_beam = narrow_beam;
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, p: Point3) -> Color {
        let l = match self.incident(p) {
            Ok(l) => l,
            // At the light's own position: no defined direction.
            Err(_) => return self.point.intensity,
        };
        let factor = self.direction.dot(*l).max(0.).powi(self.narrow_beam);
        self.point.intensity_at(p) * factor
    }

    fn incident(&self, p: Point3) -> Result<Direction> {
        self.point.incident(p)
    }

    fn distance(&self, p: Point3) -> f64 {
        self.point.distance(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient() {
        let a = AmbientLight::new(Color::new(0.5, 1., 0.), 0.2);
        assert_eq!(a.intensity(), Color::new(0.1, 0.2, 0.));
        assert_eq!(AmbientLight::NONE.intensity(), Color::BLACK);
    }

    #[test]
    fn test_directional() {
        let l = DirectionalLight::new(Color::ONE, Vec3::new(0., -2., 0.)).unwrap();
        let p = Point3::new(3., 4., 5.);
        assert_eq!(*l.incident(p).unwrap(), Vec3::new(0., -1., 0.));
        assert_eq!(l.distance(p), f64::INFINITY);
        assert_eq!(l.intensity_at(p), Color::ONE);
        assert!(DirectionalLight::new(Color::ONE, Vec3::zero()).is_err());
    }

    #[test]
    fn test_point_attenuation() {
        let l = PointLight::new(Color::broadcast(10.), Point3::zero()).with_attenuation(1., 1., 1.);
        let p = Point3::new(0., 2., 0.);
        assert_eq!(l.distance(p), 2.);
        assert_eq!(l.intensity_at(p), Color::broadcast(10. / 7.));
        assert_eq!(*l.incident(p).unwrap(), Vec3::unit_y());
        assert!(l.incident(Point3::zero()).is_err());
    }

    #[test]
    fn test_spot_falloff() {
        let s = SpotLight::new(Color::ONE, Point3::zero(), Vec3::new(0., -1., 0.))
            .unwrap()
            .with_narrow_beam(2);
        let below = Point3::new(0., -1., 0.);
        assert_eq!(s.intensity_at(below), Color::ONE);
        let behind = Point3::new(0., 1., 0.);
        assert_eq!(s.intensity_at(behind), Color::BLACK);
        let side = Point3::new(1., -1., 0.);
        let expected = 0.5_f64.sqrt().powi(2) / 1.;
        assert!((s.intensity_at(side).r() - expected).abs() < 1e-12);
    }
}
