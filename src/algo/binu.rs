//! I function master dispatcher for the right half-plane.
//!
//! Adapted from ZBINU in TOMS 644. Each lane picks its own regime:
//!
//! * power series (`seri`) when |z| ≤ 2√(ν+1);
//! * asymptotic expansion (`asyi`) when |z| ≥ max(RL, ν²/2);
//! * between the two, Miller's backward recurrence (`mlri`) for |z| ≤ RL,
//!   falling back to the series for lanes whose start index cannot be
//!   found, and the Wronskian normalization (`wrsk`) for |z| > RL.
//!
//! Series, asymptotic and Wronskian lanes evaluate the top order directly
//! and sweep downward to the lower orders; the second anchor is the
//! continued fraction for `I_{ν-1}/I_ν` or a second asymptotic evaluation.

use num_traits::Float;
use tracing::{debug, trace};

use crate::algo::asyi::asyi;
use crate::algo::lentz::lentz;
use crate::algo::mlri::mlri;
use crate::algo::seri::seri_scaled;
use crate::algo::sweep::{unscale, Ladder, Sink};
use crate::algo::wrsk::wrsk;
use crate::cayley::{Algebra, Complex};
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;
use crate::utils::{reciprocal_z, zabs};

/// Store `I_{ν0+k}(z)`, k = 0..=n, for the offsets `out` wants, in the
/// `active` lanes. Requires Re z ≥ 0 and z ≠ 0 in those lanes.
pub(crate) fn binu<L: Lane, S: Sink<L>>(z: Complex<L>, nu0: L::Scalar, n: usize, active: L::Mask, out: &mut S) {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let fnu = nu0 + t(n as f64);
    let az = zabs(z);

    let rl = <L::Scalar as BesselFloat>::rl();
    let near = L::from_f64(2.0) * L::splat(fnu + t(1.0)).sqrt();
    let far = L::splat(rl.max(fnu * fnu * t(0.5)));
    let mut series = active & az.simd_le(near);
    let asym = active & !series & az.simd_ge(far);
    let band = active & !series & !asym;
    let wronskian = band & az.simd_gt(L::splat(rl));
    let miller = band & !wronskian;
    if out.range().len() > 1 {
        trace!(
            target: "cayley_bessel",
            series = series.any(),
            asymptotic = asym.any(),
            miller = miller.any(),
            wronskian = wronskian.any(),
            orders = n + 1,
            "I regimes"
        );
    }

    if miller.any() {
        let fail = mlri(z, nu0, n, miller, out);
        if fail.any() {
            debug!(target: "cayley_bessel", "Miller recurrence failed, falling back to the power series");
            series = series | fail;
        }
    }

    let anchored = series | asym | wronskian;
    if anchored.none() {
        return;
    }

    // the lower anchor is only needed if the sweep has to go down
    let sweep = out.base() < n;
    let rz = reciprocal_z(z);
    let mut top = Complex::<L>::zero();
    let mut below = Complex::<L>::zero();
    let mut ln = L::from_f64(0.0);
    if series.any() {
        let (u, l) = seri_scaled(z, fnu, series);
        top = Complex::blend(series, u, top);
        ln = L::select(series, l, ln);
        if sweep {
            let one = Complex::from_real(L::from_f64(1.0));
            let ratio = lentz(
                rz.scale(L::splat(fnu)),
                series,
                <L::Scalar as BesselFloat>::fraction_cap(),
                |k| (one, rz.scale(L::splat(fnu + t(k as f64)))),
            );
            below = Complex::blend(series, u * ratio, below);
        }
    }
    if asym.any() {
        let (u, l) = asyi(z, fnu, asym);
        top = Complex::blend(asym, u, top);
        ln = L::select(asym, l, ln);
        if sweep {
            // same scale e^{Re z} as the top order
            let (v, _) = asyi(z, fnu - t(1.0), asym);
            below = Complex::blend(asym, v, below);
        }
    }
    if wronskian.any() {
        let (u, v, l) = wrsk(z, nu0, n, wronskian);
        top = Complex::blend(wronskian, u, top);
        below = Complex::blend(wronskian, v, below);
        ln = L::select(wronskian, l, ln);
    }

    out.put(n, unscale(top, ln), anchored);
    if !sweep {
        return;
    }
    let mut ladder = Ladder::new(top, below, ln);
    out.put(n - 1, ladder.value(), anchored);
    for k in (out.base() + 1..n).rev() {
        // I_{k-1} = I_{k+1} + (2(ν0+k)/z) I_k
        ladder.step(rz.scale(L::splat(nu0 + t(k as f64))), anchored);
        out.put(k - 1, ladder.value(), anchored);
    }
}

#[cfg(test)]
mod tests {
    use wide::f64x4;

    use super::*;
    use crate::algo::sweep::Single;

    fn i_single(nu0: f64, n: usize, z: Complex<f64>) -> Complex<f64> {
        let mut out = Single::new(n);
        binu(z, nu0, n, true, &mut out);
        out.value()
    }

    fn rel(a: Complex<f64>, re: f64, im: f64) -> f64 {
        let d = Complex::new(a.re() - re, a.im() - im);
        crate::cayley::abs(d) / (re * re + im * im).sqrt()
    }

    #[test]
    fn each_regime() {
        // series: I_{0.3}(1+i) region; Miller: I_{0.3}(5+2i); asymptotic: I_{0.3}(25+2i)
        assert!(rel(i_single(0.3, 0, Complex::new(5.0, 2.0)), -5.956543066259542, 25.202338531849275) < 1e-13);
        assert!(rel(i_single(0.3, 0, Complex::new(25.0, 2.0)), -2182652293.6831732, 5324660277.115837) < 1e-13);
        assert!(rel(i_single(0.0, 0, Complex::new(3.0, 0.0)), 4.8807925858650245, 0.0) < 1e-14);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn downward_sweep_from_series_top() {
        use crate::algo::sweep::Stash;
        // I_{0.25+k}(0.5+0.1i), k = 0..=6 (series top, continued-fraction anchor)
        let z = Complex::new(0.5, 0.1);
        let mut out = Stash::new(7);
        binu(z, 0.25, 6, true, &mut out);
        for k in 0..7 {
            let single = i_single(0.25, k, z);
            let v = out.get(k);
            assert!(rel(v, single.re(), single.im()) < 1e-13, "k = {k}");
        }
    }

    #[test]
    fn wronskian_band() {
        // RL < |z| < ν²/2
        let z = Complex::new(30.0, 10.0);
        assert!(rel(i_single(0.3, 10, z), -89358731846.01914, -124191892144.63091) < 1e-12);
        assert!(rel(i_single(0.0, 40, Complex::new(120.0, 160.0)), 2.6868722571135576e+49, -1.9266925225800136e+49) < 1e-10);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn downward_sweep_from_wronskian_top() {
        use crate::algo::sweep::Stash;
        let z = Complex::new(30.0, 10.0);
        let mut out = Stash::new(11);
        binu(z, 0.3, 10, true, &mut out);
        assert!(rel(out.get(10), -89358731846.01914, -124191892144.63091) < 1e-12);
        assert!(rel(out.get(9), -135577534444.32901, -154437553044.55554) < 1e-12);
    }

    #[test]
    fn large_order_from_log_scale() {
        // I_{40}(3) ≈ 1.4e-41
        let v = i_single(0.0, 40, Complex::new(3.0, 0.0));
        assert!(rel(v, 1.4316042657120800e-41, 0.0) < 1e-13);
    }

    #[test]
    fn mixed_regimes_in_one_call() {
        let re = [0.5, 5.0, 25.0, 3.0];
        let im = [0.2, 2.0, 2.0, 0.0];
        let z = Complex::new(f64x4::new(re), f64x4::new(im));
        let mut out = Single::new(2);
        binu(z, 0.3, 2, Mask::splat(true), &mut out);
        for i in 0..4 {
            let s = i_single(0.3, 2, Complex::new(re[i], im[i]));
            assert_eq!(Lane::lane(out.value().re(), i).to_bits(), s.re().to_bits());
            assert_eq!(Lane::lane(out.value().im(), i).to_bits(), s.im().to_bits());
        }
    }
}
