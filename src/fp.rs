//! Provides floating point utilities.

/// Values whose magnitude is below this are treated as exactly zero by the
/// geometric predicates.
pub const ZERO_TOLERANCE: f64 = 1e-10;

/// Distance a secondary ray origin is moved along the surface normal so the
/// ray does not immediately re-hit the surface it leaves.
pub const DELTA: f64 = 1e-5;

/// Inward nudge applied to grid entry points and the slack allowed when
/// checking that a hit lies in the cell being visited.
pub const GRID_EPSILON: f64 = 1e-9;

/// is_zero reports whether `x` is within [`ZERO_TOLERANCE`] of zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < ZERO_TOLERANCE
}

/// align_zero snaps values within [`ZERO_TOLERANCE`] of zero to exactly zero
/// so that sign tests on the result are stable.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.
    } else {
        x
    }
}

/// same_sign reports whether both values are non-zero and share a sign.
#[inline]
pub fn same_sign(a: f64, b: f64) -> bool {
    let (a, b) = (align_zero(a), align_zero(b));
    (a > 0. && b > 0.) || (a < 0. && b < 0.)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_zero() {
        assert_eq!(align_zero(1e-12), 0.);
        assert_eq!(align_zero(-1e-12), 0.);
        assert_eq!(align_zero(0.5), 0.5);
    }

    #[test]
    fn test_same_sign() {
        assert!(same_sign(1., 2.));
        assert!(same_sign(-1., -0.1));
        assert!(!same_sign(1., -2.));
        assert!(!same_sign(0., 2.));
        assert!(!same_sign(1e-12, 1.));
    }
}
