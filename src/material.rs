use super::color::*;

/// Phong surface coefficients. Everything defaults to zero: an opaque,
/// non-reflective surface lit only by the ambient term and its emission.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Material {
    /// Diffuse factor.
    pub kd: Color,
    /// Specular factor.
    pub ks: Color,
    /// Transparency, weight of the refracted ray and of light passing
    /// through in shadow tests.
    pub kt: Color,
    /// Reflection, weight of the mirrored ray.
    pub kr: Color,
    /// Roughness of refraction (frosted glass).
    pub kdg: f64,
    /// Roughness of reflection (glossy surfaces).
    pub ksg: f64,
    pub shininess: i32,
}

impl Material {
    pub fn new() -> Material {
        Material::default()
    }

    pub fn with_kd(mut self, kd: f64) -> Material {
        self.kd = Color::broadcast(kd);
        self
    }

    pub fn with_kd_color(mut self, kd: Color) -> Material {
        self.kd = kd;
        self
    }

    pub fn with_ks(mut self, ks: f64) -> Material {
        self.ks = Color::broadcast(ks);
        self
    }

    pub fn with_kt(mut self, kt: f64) -> Material {
        self.kt = Color::broadcast(kt);
        self
    }

    pub fn with_kr(mut self, kr: f64) -> Material {
        self.kr = Color::broadcast(kr);
        self
    }

    pub fn with_kdg(mut self, kdg: f64) -> Material {
        self.kdg = kdg;
        self
    }

    pub fn with_ksg(mut self, ksg: f64) -> Material {
        self.ksg = ksg;
        self
    }

    pub fn with_shininess(mut self, shininess: i32) -> Material {
        self.shininess = shininess;
        self
    }
}
