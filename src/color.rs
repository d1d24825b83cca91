//! RGB colors and per-channel attenuation factors.

use super::types::*;
use std::ops::{Add, AddAssign, Mul};

/// An RGB triple. Components are unbounded while shading and are only
/// clamped when converted to 8-bit output.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color(Vec3);

impl Color {
    pub const BLACK: Color = Color(Vec3 {
        x: 0.,
        y: 0.,
        z: 0.,
    });
    pub const ONE: Color = Color(Vec3 {
        x: 1.,
        y: 1.,
        z: 1.,
    });

    pub fn new(r: f64, g: f64, b: f64) -> Color {
        Color(Vec3::new(r, g, b))
    }

    pub fn broadcast(v: f64) -> Color {
        Color(Vec3::broadcast(v))
    }

    pub fn r(&self) -> f64 {
        self.0.x
    }

    pub fn g(&self) -> f64 {
        self.0.y
    }

    pub fn b(&self) -> f64 {
        self.0.z
    }

    /// Component-wise product.
    pub fn scale(&self, other: Color) -> Color {
        Color(self.0 * other.0)
    }

    /// Divides every component by `d`.
    pub fn reduce(&self, d: f64) -> Color {
        Color(self.0 / d)
    }

    /// lower_than reports whether every component is below `v`.
    pub fn lower_than(&self, v: f64) -> bool {
        self.0.x < v && self.0.y < v && self.0.z < v
    }

    pub fn is_black(&self) -> bool {
        *self == Color::BLACK
    }

    /// to_rgb8 clamps each component to the displayable range.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let f = |c: f64| (c * 255.).round().clamp(0., 255.) as u8;
        [f(self.0.x), f(self.0.y), f(self.0.z)]
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color(self.0 + rhs.0)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        Color(self.0 * rhs)
    }
}

impl std::iter::Sum for Color {
    fn sum<I: Iterator<Item = Color>>(iter: I) -> Color {
        iter.fold(Color::BLACK, |a, b| a + b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_reduce() {
        let c = Color::new(0.2, 0.4, 0.8).scale(Color::new(0.5, 0.5, 2.));
        assert_eq!(c, Color::new(0.1, 0.2, 1.6));
        assert_eq!(Color::new(2., 4., 6.).reduce(2.), Color::new(1., 2., 3.));
    }

    #[test]
    fn test_lower_than() {
        assert!(Color::broadcast(0.0005).lower_than(0.001));
        assert!(!Color::new(0.0005, 0.002, 0.).lower_than(0.001));
    }

    #[test]
    fn test_to_rgb8_clamps() {
        assert_eq!(Color::new(2., -1., 0.5).to_rgb8(), [255, 0, 128]);
    }
}
