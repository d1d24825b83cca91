// Provides random number generation.

use super::types::*;
use rand::distributions::Uniform;
pub use rand::Rng;
pub use rand::SeedableRng;

/// The [xoshiro](http://xoshiro.di.unimi.it/) generator is cheap to seed and
/// has good statistical quality, which makes it a good fit for seeding one
/// generator per pixel: every pixel gets the same jitter pattern for a given
/// seed no matter which worker thread traces it.
pub type RttRng = rand_xoshiro::Xoshiro128Plus;

/// pixel_rng returns the generator used to jitter the samples of pixel
/// `index`.
pub fn pixel_rng(seed: u64, index: usize) -> RttRng {
    RttRng::seed_from_u64(seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

pub trait RngVector {
    /// Generates a random vector inside the unit cube centred on the origin
    /// from a uniform distribution.
    fn gen_uniform_random_in_unit_cube(rng: &mut RttRng) -> Self;

    /// Generates a random offset in the unit square `[0,1)²` of the XY plane.
    /// The Z component shall be 0.
    fn gen_uniform_random_in_unit_square(rng: &mut RttRng) -> Self;
}

impl RngVector for Vec3 {
    fn gen_uniform_random_in_unit_cube(rng: &mut RttRng) -> Vec3 {
        let d = Uniform::new_inclusive(-1., 1.);
        Vec3::new(rng.sample(d), rng.sample(d), rng.sample(d))
    }

    fn gen_uniform_random_in_unit_square(rng: &mut RttRng) -> Vec3 {
        Vec3::new(rng.gen::<f64>(), rng.gen::<f64>(), 0.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_rng_is_deterministic() {
        let a: f64 = pixel_rng(3, 17).gen();
        let b: f64 = pixel_rng(3, 17).gen();
        let c: f64 = pixel_rng(3, 18).gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_unit_square() {
        let mut rng = RttRng::seed_from_u64(0);
        for _ in 0..1000 {
            let v = Vec3::gen_uniform_random_in_unit_square(&mut rng);
            assert!(v.x >= 0. && v.x < 1.);
            assert!(v.y >= 0. && v.y < 1.);
            assert_eq!(v.z, 0.);
        }
    }
}
