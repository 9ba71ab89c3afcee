//! Airy functions Ai(z), Bi(z) and their derivatives.
//!
//! Adapted from ZAIRY and ZBIRY in TOMS 644. For |z| ≤ 1 both come from
//! the Maclaurin series `Ai = c1 f - c2 g`, `Bi = √3 (c1 f + c2 g)`.
//! Farther out, inside |arg z| ≤ 2π/3,
//!
//! `Ai(z) = √z K_{1/3}(ζ) / (π√3)` and `Ai'(z) = -z K_{2/3}(ζ) / (π√3)`
//!
//! with ζ = (2/3) z^{3/2}. The rest of the plane is reached through
//! `Ai(z) + ωAi(ωz) + ω²Ai(ω²z) = 0`, ω = e^{2πi/3}, and Bi through
//! `Bi(z) = e^{iπ/6} Ai(ωz) + e^{-iπ/6} Ai(ω²z)`.

#![allow(clippy::excessive_precision)]

use num_traits::Float;

use crate::algo::constants::{AIRY_C1, AIRY_C2, AIRY_COEF, PI, TTH};
use crate::algo::series::sum_series;
use crate::algo::sweep::Single;
use crate::cayley::{Algebra, Complex};
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;
use crate::sentinel::{canonicalize, failed};
use crate::types::{AiryDerivative, Family};
use crate::utils::{rotate, zabs, zsqrt};

const SQRT3: f64 = 1.73205080756887729e+00;

/// ω = e^{2πi/3}.
#[inline]
fn omega<L: Lane>() -> Complex<L> {
    Complex::new(L::from_f64(-0.5), L::from_f64(0.5 * SQRT3))
}

/// `first + Σ t_k` with `t_k = t_{k-1} z³ / ((3k - a)(3k - b))`.
fn series<L: Lane>(first: Complex<L>, z3: Complex<L>, a: f64, b: f64, active: L::Mask) -> Complex<L> {
    let tol = <L::Scalar as BesselFloat>::tol();
    let cap = <L::Scalar as BesselFloat>::series_cap();
    sum_series(first, active, tol, cap, |k, t| {
        let k = k as f64;
        t * z3.scale(L::from_f64(1.0 / ((3.0 * k - a) * (3.0 * k - b))))
    })
}

/// The two Maclaurin parts (f, g) of the value or the derivative.
fn maclaurin<L: Lane>(z: Complex<L>, active: L::Mask, derivative: AiryDerivative) -> (Complex<L>, Complex<L>) {
    let one = Complex::from_real(L::from_f64(1.0));
    let z3 = z * z * z;
    match derivative {
        AiryDerivative::Value => (series(one, z3, 1.0, 0.0, active), series(z, z3, 0.0, -1.0, active)),
        AiryDerivative::Derivative => {
            let first = (z * z).scale(L::from_f64(0.5));
            (series(first, z3, 0.0, -2.0, active), series(one, z3, 2.0, 0.0, active))
        }
    }
}

/// Ai or Ai' from K, for |arg z| ≤ 2π/3 and z ≠ 0.
fn sector<L: Lane>(z: Complex<L>, derivative: AiryDerivative) -> Complex<L> {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let sq = zsqrt(z);
    let zeta = (z * sq).scale(L::from_f64(TTH));
    let coef = L::from_f64(AIRY_COEF);
    let mut out = Single::new(0);
    match derivative {
        AiryDerivative::Value => {
            crate::drive(Family::K, zeta, t(1.0 / 3.0), &mut out);
            (sq * out.value()).scale(coef)
        }
        AiryDerivative::Derivative => {
            crate::drive(Family::K, zeta, t(2.0 / 3.0), &mut out);
            -(z * out.value()).scale(coef)
        }
    }
}

/// Ai or Ai' in the lanes of `active`; `z` must be finite there.
fn ai_lanes<L: Lane>(z: Complex<L>, active: L::Mask, derivative: AiryDerivative) -> Complex<L> {
    let near = active & zabs(z).simd_le(L::from_f64(1.0));
    let far = active & !near;
    let mut v = Complex::zero();

    if near.any() {
        let (f, g) = maclaurin(z, near, derivative);
        let ai = f.scale(L::from_f64(AIRY_C1)) - g.scale(L::from_f64(AIRY_C2));
        v = Complex::blend(near, ai, v);
    }
    if !far.any() {
        return v;
    }

    let angle = z.im().atan2(z.re()).abs();
    let inner = far & angle.simd_le(L::from_f64(2.0 * PI / 3.0));
    let outer = far & !inner;
    if inner.any() {
        v = Complex::blend(inner, sector(z, derivative), v);
    }
    if outer.any() {
        let w = omega::<L>();
        let w2 = w.conj();
        let a1 = sector(w * z, derivative);
        let a2 = sector(w2 * z, derivative);
        let ai = match derivative {
            AiryDerivative::Value => -(w * a1) - w2 * a2,
            AiryDerivative::Derivative => -(w2 * a1) - w * a2,
        };
        v = Complex::blend(outer, ai, v);
    }
    v
}

/// Ai(z) or Ai'(z).
pub(crate) fn ai<L: Lane>(z: Complex<L>, derivative: AiryDerivative) -> Complex<L> {
    let bad = z.any_nan() | z.any_inf();
    let z = Complex::blend(bad, Complex::from_real(L::from_f64(1.0)), z);
    let v = ai_lanes(z, !bad, derivative);
    canonicalize(Complex::blend(bad, failed(), v))
}

/// Bi(z) or Bi'(z).
pub(crate) fn bi<L: Lane>(z: Complex<L>, derivative: AiryDerivative) -> Complex<L> {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let bad = z.any_nan() | z.any_inf();
    let z = Complex::blend(bad, Complex::from_real(L::from_f64(1.0)), z);
    let near = !bad & zabs(z).simd_le(L::from_f64(1.0));
    let far = !bad & !near;
    let mut v = Complex::zero();

    if near.any() {
        let (f, g) = maclaurin(z, near, derivative);
        let bi = (f.scale(L::from_f64(AIRY_C1)) + g.scale(L::from_f64(AIRY_C2))).scale(L::from_f64(SQRT3));
        v = Complex::blend(near, bi, v);
    }
    if far.any() {
        let w = omega::<L>();
        let a1 = ai_lanes(w * z, far, derivative);
        let a2 = ai_lanes(w.conj() * z, far, derivative);
        // e^{±iπ/6} for the value, e^{±5iπ/6} for the derivative
        let phase = match derivative {
            AiryDerivative::Value => 1.0 / 6.0,
            AiryDerivative::Derivative => 5.0 / 6.0,
        };
        let (c, s) = (t(PI * phase).cos(), t(PI * phase).sin());
        v = Complex::blend(far, rotate(a1, c, s) + rotate(a2, c, -s), v);
    }
    canonicalize(Complex::blend(bad, failed(), v))
}
