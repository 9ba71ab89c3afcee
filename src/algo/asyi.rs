//! Asymptotic expansion for I Bessel function.
//!
//! Adapted from ZASYI in TOMS 644. For |z| ≥ max(RL, ν²/2) and Re z ≥ 0,
//!
//! `I_ν(z) ≈ [e^z Σ a_k(ν)(-1/z)^k + i·σ·e^{iσνπ} e^{-z} Σ a_k(ν)(1/z)^k] / √(2πz)`
//!
//! with σ = sign(Im z). On the real axis the two one-sided forms are
//! averaged, which keeps real arguments real.

use crate::algo::asymptotic::{sum_asymptotic, HankelCoefficients};
use crate::algo::constants::PI;
use crate::cayley::{Algebra, Complex};
use crate::lane::Lane;
use crate::utils::{cispi, zsqrt};

/// `I_ν(z)` as `(unit, ln)` with `I_ν(z) = unit · e^{ln}` and `ln = Re z`.
pub(crate) fn asyi<L: Lane>(z: Complex<L>, nu: L::Scalar, active: L::Mask) -> (Complex<L>, L) {
    let zero = L::from_f64(0.0);
    let one = L::from_f64(1.0);
    let (x, y) = (z.re(), z.im());

    let rz = z.recip();
    let s1 = sum_asymptotic(HankelCoefficients::new(nu), -rz, active);
    let s2 = sum_asymptotic(HankelCoefficients::new(nu), rz, active);

    let sg = L::select(y.simd_gt(zero), one, L::select(y.simd_lt(zero), -one, zero));
    let (c, s) = cispi(nu);
    let coef = Complex::new(L::splat(-s), sg * L::splat(c));

    // e^z = e^x·cis(y) and e^{-z} = e^x·e^{-2x}·cis(-y)
    let (cy, sy) = (y.cos(), y.sin());
    let grow = Complex::new(cy, sy);
    let decay = Complex::new(cy, -sy).scale((x * L::from_f64(-2.0)).exp());
    let sq = zsqrt(z.scale(L::from_f64(2.0 * PI)));
    ((grow * s1 + coef * decay * s2) / sq, x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::sweep::unscale;

    #[test]
    fn complex_argument() {
        let (u, ln) = asyi(Complex::new(25.0_f64, 2.0), 0.3, true);
        let v = unscale(u, ln);
        let (re, im) = (-2182652293.6831732, 5324660277.115837);
        assert!((v.re() / re - 1.0).abs() < 1e-13);
        assert!((v.im() / im - 1.0).abs() < 1e-13);
    }

    #[test]
    fn real_argument_stays_real() {
        let (u, ln) = asyi(Complex::new(30.0_f64, 0.0), 1.5, true);
        let v = unscale(u, ln);
        assert_eq!(v.im(), 0.0);
        assert!((v.re() / 752420533212.4315 - 1.0).abs() < 1e-13);
    }

    #[test]
    fn exponent_is_kept_apart() {
        // I_{2.5}(800) ≈ 3.8e345 overflows f64
        let (u, ln) = asyi(Complex::new(800.0_f64, 0.0), 2.5, true);
        assert_eq!(ln, 800.0);
        assert!((ln + u.re().ln() - 795.7350032592169).abs() < 1e-10);
        assert!(crate::sentinel::is_infinite(unscale(u, ln)));
    }
}
