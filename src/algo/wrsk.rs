//! I Bessel function normalized by the Wronskian with K.
//!
//! Adapted from ZWRSK in TOMS 644. The ratio `I_{ν+1}/I_ν` comes from its
//! continued fraction and the pair `K_ν, K_{ν+1}` from the K engine, and
//!
//! `I_ν K_{ν+1} + I_{ν+1} K_ν = 1/z`
//!
//! fixes the scale. Used for RL < |z| < ν²/2, where the e^z normalization
//! of the Miller sweep cancels.

use num_traits::ToPrimitive;

use crate::algo::bknu::k_ladder;
use crate::algo::lentz::lentz;
use crate::cayley::{Algebra, Complex};
use crate::lane::Lane;
use crate::machine::BesselFloat;
use crate::utils::reciprocal_z;

/// `I_ν(z)` and `I_{ν-1}(z)` at ν = ν0 + n as unit values sharing the
/// log-scale returned last. Requires Re z ≥ 0 and z ≠ 0 in `active`.
/// Lanes where the fraction does not settle come back NaN.
pub(crate) fn wrsk<L: Lane>(
    z: Complex<L>,
    nu0: L::Scalar,
    n: usize,
    active: L::Mask,
) -> (Complex<L>, Complex<L>, L) {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let fnu = nu0 + t(n as f64);
    let rz = reciprocal_z(z);
    let one = Complex::from_real(L::from_f64(1.0));

    // the fraction only settles once the order passes |z|
    let reach = L::select(active, z.re().abs() + z.im().abs(), L::from_f64(0.0))
        .reduce_max()
        .to_usize()
        .unwrap_or(usize::MAX);
    let depth = reach
        .saturating_mul(2)
        .saturating_add(64)
        .clamp(<L::Scalar as BesselFloat>::fraction_cap(), <L::Scalar as BesselFloat>::miller_cap());

    // I_ν/I_{ν+1} = 2(ν+1)/z + I_{ν+2}/I_{ν+1}
    let inv = lentz(rz.scale(L::splat(fnu + t(1.0))), active, depth, |k| {
        (one, rz.scale(L::splat(fnu + t((k + 1) as f64))))
    });
    let ratio = inv.recip();

    let k = k_ladder(z, nu0, n, active);
    let w = z * (k.cur + ratio * k.prev);
    let m = w.max_abs();
    let top = w.scale(L::from_f64(1.0) / m).recip();
    // I_{ν-1}/I_ν = 2ν/z + I_{ν+1}/I_ν
    let below = top * (rz.scale(L::splat(fnu)) + ratio);
    (top, below, -(k.log_scale + m.ln()))
}
