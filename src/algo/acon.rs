//! Continuation of the right half-plane engines to the whole plane.
//!
//! Adapted from ZACON, ZBESJ and ZBESH in TOMS 644. Lower half-plane
//! arguments are folded by conjugation (every family here has real Taylor
//! coefficients in z up to the branch factor), so the engines only ever see
//! Im w ≥ 0:
//!
//! * I and K at Re w < 0 use `I(w) = e^{iνπ} I(-w)` and
//!   `K(w) = e^{-iνπ} K(-w) - iπ I(-w)`;
//! * J and H1 come from I and K at ζ = -iw:
//!   `J(w) = e^{iνπ/2} I(ζ)` and `H1(w) = (2/iπ) e^{-iνπ/2} K(ζ)`;
//! * `H2 = 2J - H1` and `Y = -i(H1 - J)`.
//!
//! Orders are ν0 + k with ν0 ≥ 0. Only the `active` lanes are written.

use crate::algo::binu::binu;
use crate::algo::bknu::bknu;
use crate::algo::constants::PI;
use crate::algo::sweep::Sink;
use crate::cayley::{Algebra, Complex};
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;
use crate::sentinel::failed;
use crate::types::Family;
use crate::utils::{cispi, either_infinite, mul_neg_i, overflow, rotate};

/// Lanes in the lower half-plane and the folded argument.
#[inline]
fn fold<L: Lane>(z: Complex<L>, active: L::Mask) -> (L::Mask, Complex<L>) {
    let lower = active & z.im().simd_lt(L::from_f64(0.0));
    (lower, Complex::blend(lower, z.conj(), z))
}

/// Store `I_{ν0+k}(z)` for the offsets `out` wants.
pub(crate) fn modified_i<L: Lane, S: Sink<L>>(z: Complex<L>, nu0: L::Scalar, n: usize, active: L::Mask, out: &mut S) {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let (lower, w) = fold(z, active);
    let left = active & w.re().simd_lt(L::from_f64(0.0));
    binu(Complex::blend(left, -w, w), nu0, n, active, out);
    for k in out.range() {
        let (c, s) = cispi(nu0 + t(k as f64));
        let v = out.get(k);
        let v = Complex::blend(left, rotate(v, c, s), v);
        out.put(k, Complex::blend(lower, v.conj(), v), active);
    }
}

/// Store `K_{ν0+k}(z)` for the offsets `out` wants.
pub(crate) fn modified_k<L: Lane, S: Sink<L>>(z: Complex<L>, nu0: L::Scalar, n: usize, active: L::Mask, out: &mut S) {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let (lower, w) = fold(z, active);
    let left = active & w.re().simd_lt(L::from_f64(0.0));
    let zeta = Complex::blend(left, -w, w);
    bknu(zeta, nu0, n, active, out);
    if left.any() {
        let mut iv = out.twin();
        binu(zeta, nu0, n, left, &mut iv);
        let pi = L::from_f64(PI);
        for k in out.range() {
            let (c, s) = cispi(nu0 + t(k as f64));
            let i = iv.get(k);
            let kv = out.get(k);
            // -iπ·I
            let jump = Complex::new(i.im() * pi, -i.re() * pi);
            let v = overflow(rotate(kv, c, -s) + jump, either_infinite(kv, i));
            out.put(k, v, left);
        }
    }
    for k in out.range() {
        let v = out.get(k);
        out.put(k, v.conj(), lower);
    }
}

/// Store each requested cylinder family of order ν0 + k into its sink.
/// All sinks must store the same offsets; `I` and `K` are not cylinder
/// families and come out `failed`.
pub(crate) fn cylinder<L: Lane, S: Sink<L>>(
    z: Complex<L>,
    nu0: L::Scalar,
    n: usize,
    active: L::Mask,
    outs: &mut [(Family, &mut S)],
) {
    let Some((_, first)) = outs.first() else {
        return;
    };
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let (lower, w) = fold(z, active);
    let upper = active & !lower;
    let zeta = mul_neg_i(w);

    let has = |f: Family| outs.iter().any(|(g, _)| *g == f);
    let need_j = has(Family::J)
        || has(Family::Y)
        || (has(Family::H1) && lower.any())
        || (has(Family::H2) && upper.any());
    let need_h = has(Family::Y) || has(Family::H1) || has(Family::H2);

    let mut iv = first.twin();
    let mut kv = first.twin();
    if need_j {
        binu(zeta, nu0, n, active, &mut iv);
    }
    if need_h {
        bknu(zeta, nu0, n, active, &mut kv);
    }

    let range = first.range();
    let two_pi = t(2.0 / PI);
    for k in range {
        let (c2, s2) = cispi((nu0 + t(k as f64)) * t(0.5));
        let j = rotate(iv.get(k), c2, s2);
        // 2/(iπ)·e^{-iμπ/2} = (2/π)(-sin, -cos)
        let h1 = rotate(kv.get(k), -s2 * two_pi, -c2 * two_pi);
        let other = overflow(j + j - h1, either_infinite(j, h1));
        for (family, out) in outs.iter_mut() {
            let v = match family {
                Family::J => j,
                Family::Y => overflow(mul_neg_i(h1 - j), either_infinite(j, h1)),
                Family::H1 => Complex::blend(lower, other, h1),
                Family::H2 => Complex::blend(lower, h1, other),
                Family::I | Family::K => failed(),
            };
            out.put(k, Complex::blend(lower, v.conj(), v), active);
        }
    }
}
