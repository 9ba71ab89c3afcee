//! Core computation of the K Bessel function in the right half z-plane.
//!
//! Adapted from ZBKNU in TOMS 644. The pair `K_d, K_{d+1}` with |d| ≤ ½ is
//! computed per lane in one of four regimes and then carried upward by the
//! forward recurrence `K_{ν+1} = K_{ν-1} + (2ν/z) K_ν`, which is stable for K:
//!
//! * |z| ≤ 2: the connection formula `π/2·(I_{-d} - I_d)/sin(dπ)`, or
//!   Temme's series when sin(dπ) is too small for it;
//! * |z| ≥ RL: the Hankel asymptotic expansion;
//! * otherwise: Miller's backward recurrence normalised by Temme's sum.
//!
//! Half-integer d has the closed form `√(π/2z)·e^{-z}`.

// Exact Fortran constants; preserve verbatim.
#![allow(clippy::excessive_precision)]

use num_traits::{Float, ToPrimitive};
use tracing::{debug, trace};

use crate::algo::asymptotic::{sum_asymptotic, HankelCoefficients};
use crate::algo::constants::{FPI, HPI, PI, R1M5, RTHPI, SPI, TTH};
use crate::algo::gamma::rgamma;
use crate::algo::seri::seri;
use crate::algo::sweep::{Ladder, Sink};
use crate::cayley::{Algebra, Complex};
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;
use crate::sentinel::failed;
use crate::utils::{cospi, reciprocal_z, sinpi, zabs, zexp, zln, zshch, zsqrt};

/// Radius of the small-argument regime (Fortran: R1).
const R1: f64 = 2.0;

/// Steps of the forward start-index search of the Miller sweep (Fortran: KMAX).
const KMAX: usize = 30;

/// Chebyshev coefficients of `1/Γ(1-x)` near zero; CC(1) is Euler's γ.
#[rustfmt::skip]
const CC: [f64; 8] = [
    5.77215664901532861e-01,
   -4.20026350340952355e-02,
   -4.21977345555443367e-02,
    7.21894324666309954e-03,
   -2.15241674114950973e-04,
   -2.01348547807882387e-05,
    1.13302723198169588e-06,
    6.11609510448141582e-09,
];

/// `K_d, K_{d+1}` as unit values sharing one log-scale.
struct Pair<L: Lane> {
    k0: Complex<L>,
    k1: Complex<L>,
    ln: L,
}

/// Store `K_{ν0+k}(z)`, k = 0..=n, for the offsets `out` wants, in the
/// `active` lanes. Requires Re z ≥ 0, z ≠ 0 and ν0 ≥ 0 in those lanes.
/// Lanes where no regime converges receive `failed`.
pub(crate) fn bknu<L: Lane, S: Sink<L>>(z: Complex<L>, nu0: L::Scalar, n: usize, active: L::Mask, out: &mut S) {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let (d, off) = shift(nu0);
    let pair = base_pair(z, d, active, n + 1);

    let rz = reciprocal_z(z);
    let mut ladder = Ladder::new(pair.k0, pair.k1, pair.ln);
    if off == 0 {
        out.put(0, ladder.previous(), active);
    }
    out.put(1 - off, ladder.value(), active);
    for j in 1..n + off {
        ladder.step(rz.scale(L::splat(d + t(j as f64))), active);
        out.put(j + 1 - off, ladder.value(), active);
    }
}

/// `K_{ν0+n}(z)` and `K_{ν0+n+1}(z)` as the previous and current values
/// of a ladder, so callers keep the log-scale.
pub(crate) fn k_ladder<L: Lane>(z: Complex<L>, nu0: L::Scalar, n: usize, active: L::Mask) -> Ladder<L> {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let (d, off) = shift(nu0);
    let pair = base_pair(z, d, active, 1);
    let rz = reciprocal_z(z);
    let mut ladder = Ladder::new(pair.k0, pair.k1, pair.ln);
    for j in 1..=n + off {
        ladder.step(rz.scale(L::splat(d + t(j as f64))), active);
    }
    ladder
}

/// ν0 = d + off with |d| ≤ ½.
#[inline]
fn shift<T: BesselFloat>(nu0: T) -> (T, usize) {
    if nu0 < T::from_f64(0.5) {
        (nu0, 0)
    } else {
        (nu0 - T::one(), 1)
    }
}

/// `K_d, K_{d+1}` in the `active` lanes, each lane in its own regime.
fn base_pair<L: Lane>(z: Complex<L>, d: L::Scalar, active: L::Mask, orders: usize) -> Pair<L> {
    if d.abs() == <L::Scalar as BesselFloat>::from_f64(0.5) {
        return half_pair(z, d);
    }
    let caz = zabs(z);
    let small = active & caz.simd_le(L::from_f64(R1));
    let far = active & !small & caz.simd_ge(L::splat(<L::Scalar as BesselFloat>::rl()));
    let mid = active & !small & !far;
    if orders > 1 {
        trace!(
            target: "cayley_bessel",
            small = small.any(),
            asymptotic = far.any(),
            miller = mid.any(),
            orders,
            "K regimes"
        );
    }

    let mut p = Pair {
        k0: Complex::zero(),
        k1: Complex::zero(),
        ln: L::from_f64(0.0),
    };
    let mut fail = L::Mask::splat(false);
    if small.any() {
        let (k0, k1, bad) = if sinpi(d).abs() >= <L::Scalar as BesselFloat>::branch_tol() {
            let (k0, k1) = connection_pair(z, d, small);
            (k0, k1, L::Mask::splat(false))
        } else {
            temme_pair(z, d, small)
        };
        p.k0 = Complex::blend(small, k0, p.k0);
        p.k1 = Complex::blend(small, k1, p.k1);
        fail = fail | bad;
    }
    if far.any() {
        let q = asymptotic_pair(z, d, far);
        p.k0 = Complex::blend(far, q.k0, p.k0);
        p.k1 = Complex::blend(far, q.k1, p.k1);
        p.ln = L::select(far, q.ln, p.ln);
    }
    if mid.any() {
        let (q, bad) = miller_pair(z, d, mid);
        p.k0 = Complex::blend(mid, q.k0, p.k0);
        p.k1 = Complex::blend(mid, q.k1, p.k1);
        p.ln = L::select(mid, q.ln, p.ln);
        fail = fail | bad;
    }
    if fail.any() {
        debug!(target: "cayley_bessel", "K pair did not converge");
        p.k0 = Complex::blend(fail, failed(), p.k0);
        p.k1 = Complex::blend(fail, failed(), p.k1);
    }
    p
}

/// `√(π/2z)·e^{-z}` as `(unit, ln)`.
fn plane_wave<L: Lane>(z: Complex<L>) -> (Complex<L>, L) {
    let y = z.im();
    let unit = Complex::from_real(L::from_f64(RTHPI)) / zsqrt(z) * Complex::new(y.cos(), -y.sin());
    (unit, -z.re())
}

/// d = ±½: `K_{±1/2} = √(π/2z)·e^{-z}` and `K_{3/2} = K_{1/2}·(1 + 1/z)`.
fn half_pair<L: Lane>(z: Complex<L>, d: L::Scalar) -> Pair<L> {
    let (c, ln) = plane_wave(z);
    let k1 = if d > <L::Scalar as num_traits::Zero>::zero() {
        c * (z.recip() + Complex::from_real(L::from_f64(1.0)))
    } else {
        c
    };
    Pair { k0: c, k1, ln }
}

/// Small |z| and sin(dπ) bounded away from zero.
fn connection_pair<L: Lane>(z: Complex<L>, d: L::Scalar, active: L::Mask) -> (Complex<L>, Complex<L>) {
    let one = <L::Scalar as num_traits::One>::one();
    let f = L::from_f64(0.5 * PI) / L::splat(sinpi(d));
    let k0 = (seri(z, -d, active) - seri(z, d, active)).scale(f);
    // sin((d+1)π) = -sin(dπ)
    let k1 = (seri(z, d + one, active) - seri(z, -d - one, active)).scale(f);
    (k0, k1)
}

/// Temme's series for small |z| and d near zero. Returns the failed lanes.
fn temme_pair<L: Lane>(z: Complex<L>, d: L::Scalar, active: L::Mask) -> (Complex<L>, Complex<L>, L::Mask) {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let zero = <L::Scalar as num_traits::Zero>::zero();
    let one_s = <L::Scalar as num_traits::One>::one();
    let tol = <L::Scalar as BesselFloat>::tol();
    let one = L::from_f64(1.0);

    let rz = reciprocal_z(z);
    let mut smu = zln(rz);
    let fc = if d.abs() > tol { d * t(PI) / sinpi(d) } else { one_s };
    let fmu = smu.scale(L::splat(d));
    let (sh, cch) = zshch(fmu);
    if d != zero {
        smu = sh.scale(L::splat(one_s / d));
    }

    // g1 = (1/Γ(1-d) - 1/Γ(1+d)) / 2d, g2 = (1/Γ(1-d) + 1/Γ(1+d)) / 2
    let t2 = rgamma(one_s + d);
    let t1 = one_s / (t2 * fc);
    let g1 = if d.abs() > t(0.1) {
        (t1 - t2) / (d + d)
    } else {
        let d2 = d * d;
        let mut ak = one_s;
        let mut s = t(CC[0]);
        for c in &CC[1..] {
            ak = ak * d2;
            let tm = t(*c) * ak;
            s = s + tm;
            if tm.abs() < tol {
                break;
            }
        }
        -s
    };
    let g2 = (t1 + t2) * t(0.5);

    let mut f = (cch.scale(L::splat(g1)) + smu.scale(L::splat(g2))).scale(L::splat(fc));
    let pt = zexp(fmu);
    let mut p = pt.scale(L::splat(t(0.5) / t2));
    let mut q = pt.recip().scale(L::splat(t(0.5) / t1));
    let mut s1 = f;
    let mut s2 = p;

    let caz = zabs(z);
    let cz = (z * z).scale(L::from_f64(0.25));
    let tm = caz * caz * L::from_f64(0.25);
    let tl = L::splat(tol);
    let mut ak = one_s;
    let mut bk = one_s - d * d;
    let mut a1 = one;
    let mut ck = Complex::from_real(one);
    let mut done = !active | tm.simd_le(tl);
    let cap = <L::Scalar as BesselFloat>::series_cap();
    let mut k = 0;
    while !done.all() {
        if k == cap {
            return (s1, s2 * rz, active & !done);
        }
        k += 1;
        let live = !done;
        f = (f.scale(L::splat(ak)) + p + q).scale(L::splat(one_s / bk));
        p = p.scale(L::splat(one_s / (ak - d)));
        q = q.scale(L::splat(one_s / (ak + d)));
        let rk = L::splat(one_s / ak);
        ck = (ck * cz).scale(rk);
        s1 = Complex::blend(live, s1 + ck * f, s1);
        s2 = Complex::blend(live, s2 + ck * (p - f.scale(L::splat(ak))), s2);
        a1 = a1 * tm * rk;
        bk = bk + ak + ak + one_s;
        ak = ak + one_s;
        done = done | (live & a1.simd_le(tl));
    }
    (s1, s2 * rz, L::Mask::splat(false))
}

/// Hankel expansion for |z| ≥ RL.
fn asymptotic_pair<L: Lane>(z: Complex<L>, d: L::Scalar, active: L::Mask) -> Pair<L> {
    let (c, ln) = plane_wave(z);
    let w = z.recip();
    let one = <L::Scalar as num_traits::One>::one();
    Pair {
        k0: c * sum_asymptotic(HankelCoefficients::new(d), w, active),
        k1: c * sum_asymptotic(HankelCoefficients::new(d + one), w, active),
        ln,
    }
}

/// Miller's backward recurrence for K, normalised by the sum of the
/// recurrence values. Returns the lanes whose start-index search failed.
fn miller_pair<L: Lane>(z: Complex<L>, d: L::Scalar, active: L::Mask) -> (Pair<L>, L::Mask) {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let tol = <L::Scalar as BesselFloat>::tol();
    let zero = L::from_f64(0.0);
    let one = L::from_f64(1.0);
    let (x, y) = (z.re(), z.im());
    let caz = zabs(z);

    let (coef, ln) = plane_wave(z);
    let dnu2 = if d.abs() > tol { d * d } else { t(0.0) };
    let akc = cospi(d).abs();
    let fhs = (t(0.25) - dnu2).abs();

    let digits = t(f64::from(<L::Scalar as BesselFloat>::MACH_DIGITS - 1));
    let t1r = (digits * t(R1M5) * t(3.321928094)).max(t(12.0)).min(t(60.0));
    let t2 = t(TTH) * t1r - t(6.0);
    let ang = L::select(x.simd_ne(zero), (y / x).abs().atan(), L::from_f64(HPI));

    // Far lanes: start index from a forward test sweep.
    let far = active & caz.simd_ge(L::splat(t2));
    let etest = L::splat(akc) / (L::from_f64(PI) * caz * L::splat(tol));
    let search = far & etest.simd_ge(one);
    let mut fk = one;
    let mut fail = L::Mask::splat(false);
    if search.any() {
        let mut fks = L::from_f64(2.0);
        let mut ckr = caz + caz + L::from_f64(2.0);
        let mut p1r = zero;
        let mut p2r = one;
        let mut fhs_l = L::splat(fhs);
        let mut hit = !search;
        for _ in 0..KMAX {
            if hit.all() {
                break;
            }
            let live = !hit;
            let ak = fhs_l / fks;
            let cbr = ckr / (fk + one);
            let ptr = p2r;
            p2r = L::select(live, cbr * p2r - p1r * ak, p2r);
            p1r = L::select(live, ptr, p1r);
            ckr = L::select(live, ckr + L::from_f64(2.0), ckr);
            fks = L::select(live, fks + fk + fk + L::from_f64(2.0), fks);
            fhs_l = L::select(live, fhs_l + fk + fk, fhs_l);
            fk = L::select(live, fk + one, fk);
            hit = hit | (live & etest.simd_lt(p2r.abs() * fk));
        }
        fail = search & !hit;
        fk = L::select(search, fk + L::from_f64(SPI) * ang * (L::splat(t2) / caz).sqrt(), fk);
    }

    // Near lanes: empirical start index.
    let near = active & !far;
    if near.any() {
        let ak = L::splat(t(FPI) * akc / tol) / caz.sqrt().sqrt();
        let aa = L::from_f64(3.0) * ang / (one + caz);
        let bb = L::from_f64(14.7) * ang / (L::from_f64(28.0) + caz);
        let akl = (ak.ln() + caz * aa.cos() / (one + L::from_f64(0.008) * caz)) / bb.cos();
        let fk_near = L::from_f64(0.12125) * akl * akl / caz + L::from_f64(1.5);
        fk = L::select(near, fk_near, fk);
    }

    let ok = active & !fail;
    let top = L::select(ok, fk.floor(), zero);
    let start = top.reduce_max().to_usize().unwrap_or(0);
    let fh = L::splat(fhs);
    let mut p1 = Complex::<L>::zero();
    let mut p2 = Complex::from_real(L::splat(tol));
    let mut cs = p2;
    for c in (1..=start).rev() {
        let fkc = L::splat(t(c as f64));
        let live = ok & fkc.simd_le(top);
        let fks = fkc * fkc;
        let a1 = fks - fkc;
        let ak = (fks + fkc) / (a1 + fh);
        let rak = L::from_f64(2.0) / (fkc + one);
        let cb = Complex::new((fkc + x) * rak, y * rak);
        let next = (cb * p2 - p1).scale(ak);
        p1 = Complex::blend(live, p2, p1);
        p2 = Complex::blend(live, next, p2);
        cs = Complex::blend(live, cs + next, cs);
    }

    let s1 = coef * (p2 / cs);
    let s2 = s1 * ((Complex::from_real(L::splat(d + t(0.5))) - p1 / p2) / z + Complex::from_real(one));
    (Pair { k0: s1, k1: s2, ln }, fail)
}

#[cfg(test)]
mod tests {
    use wide::{f32x4, f64x4};

    use super::*;
    use crate::algo::sweep::Single;

    fn k_single(nu0: f64, n: usize, z: Complex<f64>) -> Complex<f64> {
        let mut out = Single::new(n);
        bknu(z, nu0, n, true, &mut out);
        out.value()
    }

    fn rel(a: Complex<f64>, re: f64, im: f64) -> f64 {
        let d = Complex::new(a.re() - re, a.im() - im);
        crate::cayley::abs(d) / (re * re + im * im).sqrt()
    }

    #[test]
    fn temme_near_integer_order() {
        assert!(rel(k_single(0.0, 0, Complex::new(1.0, 1.0)), 0.08019772694651782, -0.3572774592853302) < 1e-14);
        assert!(rel(k_single(0.05, 0, Complex::new(0.7, 0.0)), 0.661312321976528, 0.0) < 1e-14);
    }

    #[test]
    fn connection_formula() {
        let z = Complex::new(1.5, -0.5);
        assert!(rel(k_single(0.3, 0, z), 0.17023353990276585, 0.12948252019001374) < 1e-13);
        assert!(rel(k_single(0.3, 1, z), 0.22957022351534592, 0.21466080727246314) < 1e-13);
        // d = -0.25 stores K_{d+1} at offset 0
        let w = Complex::new(0.5, 1.0);
        assert!(rel(k_single(0.75, 0, w), -0.0522360462208819, -0.7711631277697009) < 1e-13);
        assert!(rel(k_single(0.75, 1, w), -0.9094072249983265, -1.0870857358053485) < 1e-13);
    }

    #[test]
    fn miller_and_asymptotic() {
        assert!(rel(k_single(0.7, 1, Complex::new(6.0, 6.0)), 0.0011636931515603154, -0.0002489774137439146) < 1e-13);
        assert!(rel(k_single(0.0, 3, Complex::new(25.0, 2.0)), -1.9121724275535e-12, -3.650929268053118e-12) < 1e-13);
        assert!(rel(k_single(0.0, 0, Complex::new(30.0, 0.0)), 2.1324774964630564e-14, 0.0) < 1e-14);
    }

    #[test]
    fn half_integer_closed_form() {
        assert!(rel(k_single(0.5, 2, Complex::new(3.0, 1.0)), 0.014479164813983869, -0.07558279054509585) < 1e-14);
        assert!(rel(k_single(0.5, 0, Complex::new(40.0, 0.0)), 8.418809194948906e-19, 0.0) < 1e-14);
    }

    #[test]
    fn forward_recurrence_from_tiny_argument() {
        // K_7(0.001) ≈ 4.6e25
        let v = k_single(0.0, 7, Complex::new(1e-3, 0.0));
        assert!(rel(v, 4.607999808000004e+25, 0.0) < 1e-13);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn sequence_from_miller_pair() {
        use crate::algo::sweep::Stash;
        let refs = [
            (-0.010174707527861005, 0.0019132770544241374),
            (-0.011716623213010452, 0.0036123746695158345),
            (-0.014786466739828277, 0.008261996199012259),
            (-0.018863477912363927, 0.019713110752746878),
        ];
        let mut out = Stash::new(4);
        bknu(Complex::new(4.0, 3.0), 0.6, 3, true, &mut out);
        for (k, (re, im)) in refs.iter().enumerate() {
            assert!(rel(out.get(k), *re, *im) < 1e-13, "k = {k}");
        }
    }

    #[test]
    fn forward_search_in_single_precision() {
        // f32 switches to the forward start-index search for |z| ≥ 9.33
        let mut out = Single::new(0);
        bknu(Complex::new(10.0_f32, 0.0), 0.2, 0, true, &mut out);
        let v = out.value();
        assert!((v.re() / 1.7814042727715025e-05 - 1.0).abs() < 1e-5, "{v:?}");
    }

    #[test]
    fn lanes_match_scalar_bitwise() {
        let re = [0.7, 6.0, 25.0, 1.0];
        let im = [0.0, 6.0, 2.0, 1.0];
        let z = Complex::new(f64x4::new(re), f64x4::new(im));
        let mut out = Single::new(3);
        bknu(z, 0.05, 3, Mask::splat(true), &mut out);
        for i in 0..4 {
            let s = k_single(0.05, 3, Complex::new(re[i], im[i]));
            assert_eq!(Lane::lane(out.value().re(), i).to_bits(), s.re().to_bits());
            assert_eq!(Lane::lane(out.value().im(), i).to_bits(), s.im().to_bits());
        }

        let z = Complex::new(f32x4::new([0.5, 4.0, 10.0, 15.0]), f32x4::splat(0.5));
        let mut out = Single::new(1);
        bknu(z, 0.3, 1, Mask::splat(true), &mut out);
        for i in 0..4 {
            let mut s = Single::new(1);
            bknu(Complex::new(Lane::lane(z.re(), i), 0.5_f32), 0.3, 1, true, &mut s);
            assert_eq!(Lane::lane(out.value().re(), i).to_bits(), s.value().re().to_bits());
        }
    }
}
