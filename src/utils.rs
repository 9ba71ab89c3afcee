//! Overflow-safe complex helpers over any lane type.
//!
//! Lane-generic forms of Amos ZABS, ZSHCH, ZEXP, ZLOG and ZSQRT, plus the
//! exact `sinpi`/`cospi` used for order-dependent phases.

use num_traits::Float;

use crate::cayley::{Algebra, Complex};
use crate::lane::Lane;
use crate::machine::BesselFloat;
use crate::sentinel::{complex_infinity, is_infinite};

/// Multiply by -i: (a+bi)·(-i) = b-ai.
#[inline]
pub(crate) fn mul_neg_i<L: Lane>(c: Complex<L>) -> Complex<L> {
    Complex::new(c.im(), -c.re())
}

/// Overflow-safe modulus, factoring out the larger component:
///   `max * sqrt(1 + (min/max)²)`
///
/// Equivalent to Fortran ZABS in TOMS 644. NaN components give NaN.
#[inline]
pub(crate) fn zabs<L: Lane>(z: Complex<L>) -> L {
    let u = z.re().abs();
    let v = z.im().abs();
    let big = u.max(v);
    let small = u.min(v);
    let zero = L::from_f64(0.0);
    let vanishing = big.simd_eq(zero);
    let safe = L::select(vanishing, L::from_f64(1.0), big);
    let q = L::select(small.simd_eq(big), L::from_f64(1.0), small / safe);
    let r = big * (L::from_f64(1.0) + q * q).sqrt();
    let r = L::select(vanishing, zero, r);
    L::select(z.any_nan(), u + v, r)
}

/// Overflow-safe `2 / z`, the `RZ` of ZBKNU, ZSERI and ZMLRI.
#[inline]
pub(crate) fn reciprocal_z<L: Lane>(z: Complex<L>) -> Complex<L> {
    let raz = L::from_f64(1.0) / zabs(z);
    let str = z.re() * raz;
    let sti = -z.im() * raz;
    Complex::new((str + str) * raz, (sti + sti) * raz)
}

/// Complex exponential. A zero imaginary part stays exactly zero, so
/// `exp(x)` overflowing on the real axis yields `(inf, 0)`.
#[inline]
pub(crate) fn zexp<L: Lane>(z: Complex<L>) -> Complex<L> {
    let e = z.re().exp();
    let im = L::select(z.im().simd_eq(L::from_f64(0.0)), z.im(), e * z.im().sin());
    Complex::new(e * z.im().cos(), im)
}

/// Principal logarithm.
#[inline]
pub(crate) fn zln<L: Lane>(z: Complex<L>) -> Complex<L> {
    Complex::new(zabs(z).ln(), z.im().atan2(z.re()))
}

/// Principal square root (ZSQRT): `sqrt|z| · e^{i·arg(z)/2}`.
#[inline]
pub(crate) fn zsqrt<L: Lane>(z: Complex<L>) -> Complex<L> {
    let r = zabs(z).sqrt();
    let half = z.im().atan2(z.re()) * L::from_f64(0.5);
    Complex::new(r * half.cos(), r * half.sin())
}

/// `(sinh z, cosh z)` (ZSHCH):
///   sinh(x+iy) = sinh(x)cos(y) + i·cosh(x)sin(y)
///   cosh(x+iy) = cosh(x)cos(y) + i·sinh(x)sin(y)
#[inline]
pub(crate) fn zshch<L: Lane>(z: Complex<L>) -> (Complex<L>, Complex<L>) {
    let sh = z.re().sinh();
    let ch = z.re().cosh();
    let sn = z.im().sin();
    let cn = z.im().cos();
    (Complex::new(sh * cn, ch * sn), Complex::new(ch * cn, sh * sn))
}

/// `v`, replaced by complex infinity in the lanes of `over`.
#[inline]
pub(crate) fn overflow<L: Lane>(v: Complex<L>, over: L::Mask) -> Complex<L> {
    Complex::blend(over, complex_infinity(), v)
}

/// Lanes where `a` or `b` has overflowed and neither has failed.
#[inline]
pub(crate) fn either_infinite<L: Lane>(a: Complex<L>, b: Complex<L>) -> L::Mask {
    (a.any_inf() | b.any_inf()) & !(a.any_nan() | b.any_nan())
}

/// Multiply by the scalar unit `c + i·s`. An infinite `z` gives complex
/// infinity rather than the NaN of `∞·0` or `∞ - ∞`.
#[inline]
pub(crate) fn rotate<L: Lane>(z: Complex<L>, c: L::Scalar, s: L::Scalar) -> Complex<L> {
    overflow(z * Complex::new(L::splat(c), L::splat(s)), is_infinite(z))
}

/// `a·ca + b·cb` for scalar coefficients. Terms whose coefficient is
/// exactly zero are dropped, and an infinite surviving term gives complex
/// infinity.
#[inline]
pub(crate) fn combine<L: Lane>(a: Complex<L>, ca: L::Scalar, b: Complex<L>, cb: L::Scalar) -> Complex<L> {
    let zero = <L::Scalar as num_traits::Zero>::zero();
    match (ca == zero, cb == zero) {
        (true, true) => Complex::zero(),
        (true, false) => overflow(b.scale(L::splat(cb)), is_infinite(b)),
        (false, true) => overflow(a.scale(L::splat(ca)), is_infinite(a)),
        (false, false) => overflow(a.scale(L::splat(ca)) + b.scale(L::splat(cb)), either_infinite(a, b)),
    }
}

/// `(cos πx, sin πx)` with exact zeros and units.
#[inline]
pub(crate) fn cispi<T: BesselFloat>(x: T) -> (T, T) {
    (cospi(x), sinpi(x))
}

/// Compute sin(π·x) with exact values at half-integers.
///
/// Reduces the argument modulo 2 first, so `sinpi(n)` is exactly 0 for
/// any integer `n`, and `sinpi(n + 0.5)` is exactly ±1.
///
/// Algorithm follows scipy/xsf: reduce to [0, 0.5], use symmetry.
#[inline]
pub(crate) fn sinpi<T: BesselFloat>(x: T) -> T {
    let zero = T::zero();
    let one = T::one();
    let two = T::from_f64(2.0);
    let half = T::from_f64(0.5);
    let one_half = T::from_f64(1.5);
    let pi = T::from_f64(core::f64::consts::PI);

    // sinpi is odd: sinpi(-x) = -sinpi(x)
    let (ax, sign) = if x < zero { (-x, -one) } else { (x, one) };

    let r = ax % two;

    if r == zero || r == one {
        return zero;
    }
    if r == half {
        return sign;
    }
    if r == one_half {
        return -sign;
    }

    let s = if r < half {
        (r * pi).sin()
    } else if r < one {
        ((one - r) * pi).sin()
    } else if r < one_half {
        -((r - one) * pi).sin()
    } else {
        -((two - r) * pi).sin()
    };

    sign * s
}

/// Compute cos(π·x) with exact values at integers and half-integers.
///
/// Algorithm follows scipy/xsf: reduce to [0, 0.5], use symmetry.
#[inline]
pub(crate) fn cospi<T: BesselFloat>(x: T) -> T {
    let zero = T::zero();
    let one = T::one();
    let two = T::from_f64(2.0);
    let half = T::from_f64(0.5);
    let one_half = T::from_f64(1.5);
    let pi = T::from_f64(core::f64::consts::PI);

    // cospi is even: cospi(-x) = cospi(x)
    let r = Float::abs(x) % two;

    if r == zero {
        return one;
    }
    if r == half || r == one_half {
        return zero;
    }
    if r == one {
        return -one;
    }

    if r < half {
        (r * pi).cos()
    } else if r < one {
        -((one - r) * pi).cos()
    } else if r < one_half {
        -((r - one) * pi).cos()
    } else {
        ((two - r) * pi).cos()
    }
}

#[cfg(test)]
mod tests {
    use wide::f64x4;

    use super::*;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    // ── zabs ──

    #[test]
    fn zabs_basics() {
        assert_eq!(zabs(c(0.0, 0.0)), 0.0);
        assert!((zabs(c(-5.0, 0.0)) - 5.0).abs() < 1e-15);
        assert!((zabs(c(0.0, 4.0)) - 4.0).abs() < 1e-15);
        assert!((zabs(c(3.0, 4.0)) - 5.0).abs() < 1e-15);
        assert!((zabs(c(1.0, 1.0)) - 2.0_f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn zabs_large_values_no_overflow() {
        // Values near sqrt(f64::MAX) would overflow with naive re²+im²
        let big = 1.0e154;
        let expected = big * 2.0_f64.sqrt();
        assert!((zabs(c(big, big)) - expected).abs() / expected < 1e-15);
    }

    #[test]
    fn zabs_tiny_values_no_underflow() {
        let tiny = 1.0e-308;
        let r = zabs(c(tiny, tiny));
        assert!(r > 0.0);
        assert!((r - tiny * 2.0_f64.sqrt()).abs() / (tiny * 2.0_f64.sqrt()) < 1e-15);
    }

    #[test]
    fn zabs_nan_and_infinity() {
        assert!(zabs(c(f64::NAN, 1.0)).is_nan());
        assert_eq!(zabs(c(f64::INFINITY, 1.0)), f64::INFINITY);
    }

    #[test]
    fn zabs_f32() {
        let z = Complex::new(3.0_f32, 4.0);
        assert!((zabs(z) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn zabs_wide_matches_scalar() {
        let re = [3.0, 0.0, -1e200, 2.5];
        let im = [4.0, 0.0, 1e200, -0.5];
        let w = zabs(Complex::new(f64x4::new(re), f64x4::new(im)));
        for i in 0..4 {
            assert_eq!(w.to_array()[i].to_bits(), zabs(c(re[i], im[i])).to_bits());
        }
    }

    // ── elementary functions ──

    #[test]
    fn reciprocal_z_known() {
        // 2/(1+i) = 1 - i
        let r = reciprocal_z(c(1.0, 1.0));
        assert!((r.re() - 1.0).abs() < 1e-15);
        assert!((r.im() + 1.0).abs() < 1e-15);
    }

    #[test]
    fn exp_ln_sqrt() {
        let z = c(0.75, -1.25);
        let e = zexp(zln(z));
        assert!((e.re() - 0.75).abs() < 1e-14 && (e.im() + 1.25).abs() < 1e-14);
        let s = zsqrt(z);
        let p = s * s;
        assert!((p.re() - 0.75).abs() < 1e-14 && (p.im() + 1.25).abs() < 1e-14);
        // branch cut: sqrt(-4 + 0i) = 2i, sqrt(-4 - 0i) = -2i
        assert!((zsqrt(c(-4.0, 0.0)).im() - 2.0).abs() < 1e-15);
        assert!((zsqrt(c(-4.0, -0.0)).im() + 2.0).abs() < 1e-15);
    }

    #[test]
    fn exp_overflow_on_real_axis() {
        let e = zexp(c(800.0, 0.0));
        assert_eq!(e.re(), f64::INFINITY);
        assert_eq!(e.im(), 0.0);
    }

    #[test]
    fn shch_identity() {
        // cosh²(z) - sinh²(z) = 1
        let (csh, cch) = zshch(c(1.5, 2.3));
        let lhs = cch * cch - csh * csh;
        assert!((lhs.re() - 1.0).abs() < 1e-13);
        assert!(lhs.im().abs() < 1e-13);
        let (sh, ch) = zshch(c(0.0, 1.5));
        assert!(sh.re().abs() < 1e-15 && (sh.im() - 1.5_f64.sin()).abs() < 1e-15);
        assert!((ch.re() - 1.5_f64.cos()).abs() < 1e-15);
    }

    // ── sinpi / cospi ──

    #[test]
    fn sinpi_integers_are_zero() {
        for n in -5..=5 {
            let x = n as f64;
            assert_eq!(sinpi(x), 0.0, "sinpi({x}) should be exactly 0");
        }
    }

    #[test]
    fn sinpi_half_integers() {
        assert_eq!(sinpi(0.5_f64), 1.0);
        assert_eq!(sinpi(1.5_f64), -1.0);
        assert_eq!(sinpi(2.5_f64), 1.0);
        assert_eq!(sinpi(-0.5_f64), -1.0);
        assert_eq!(sinpi(-1.5_f64), 1.0);
    }

    #[test]
    fn sinpi_general_values() {
        assert!((sinpi(0.25_f64) - core::f64::consts::FRAC_1_SQRT_2).abs() < 1e-15);
        assert!((sinpi(1.0_f64 / 6.0) - 0.5).abs() < 1e-15);
        assert_eq!(sinpi(1e15_f64), 0.0);
        assert_eq!(sinpi(1.5_f32), -1.0);
    }

    #[test]
    fn cospi_exact_points() {
        assert_eq!(cospi(0.0_f64), 1.0);
        assert_eq!(cospi(1.0_f64), -1.0);
        assert_eq!(cospi(-2.0_f64), 1.0);
        for n in -5..=5 {
            let x = n as f64 + 0.5;
            assert_eq!(cospi(x), 0.0, "cospi({x}) should be exactly 0");
        }
        assert!((cospi(1.0_f64 / 3.0) - 0.5).abs() < 1e-15);
        assert_eq!(cospi(0.5_f32), 0.0);
    }

    #[test]
    fn combine_skips_zero_coefficients() {
        let inf = c(f64::INFINITY, 0.0);
        assert_eq!(combine(c(1.0, 2.0), 3.0, inf, 0.0), c(3.0, 6.0));
        assert_eq!(combine(c(1.0, 2.0), 1.0, c(0.5, 0.0), -2.0), c(0.0, 2.0));
    }

    #[test]
    fn overflow_survives_mixing() {
        let inf = complex_infinity::<Complex<f64>>();
        // (∞, ∞)·i and ∞ - ∞ would both give NaN
        assert_eq!(rotate(inf, 0.0, 1.0), inf);
        assert_eq!(rotate(c(f64::INFINITY, 0.0), 0.6, 0.8), inf);
        assert_eq!(combine(inf, 0.5, inf, -0.5), inf);
        assert_eq!(combine(c(1.0, 0.0), 0.3, inf, -2.0), inf);
        let nan = crate::sentinel::failed::<Complex<f64>>();
        assert!(combine(nan, 1.0, inf, 1.0).any_nan());
        assert!(rotate(nan, 0.0, 1.0).any_nan());
    }

    #[test]
    fn rotate_by_quarter_turn() {
        let (co, si) = cispi(0.5_f64);
        let r = rotate(c(2.0, 3.0), co, si);
        assert_eq!(r, c(-3.0, 2.0));
        assert_eq!(mul_neg_i(r), c(2.0, 3.0));
    }
}
