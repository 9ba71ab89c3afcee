//! Continued fractions by the modified Lentz algorithm.
//!
//! Evaluates `b0 + a1/(b1 + a2/(b2 + ...))` through the ratios
//! `C_k = A_k/A_{k-1}` and `D_k = B_{k-1}/B_k` of the convergents, so the
//! numerator and denominator sequences never have to be formed (and never
//! overflow). Zero denominators are nudged to a tiny value.

use tracing::debug;

use crate::cayley::{abs, Algebra};
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;
use crate::sentinel::failed;

type MaskOf<Z> = <<Z as Algebra>::Lane as Lane>::Mask;
type ScalarOf<Z> = <<Z as Algebra>::Lane as Lane>::Scalar;

/// Evaluate `b0 + a1/(b1 + a2/(b2 + ...))` with `terms(k) = (a_k, b_k)`.
///
/// Stops per lane once successive convergents agree to machine tolerance;
/// lanes still moving after `depth_cap` levels come back as `failed`.
/// Division is on the right (`a · C⁻¹`), which matters above order 4.
///
/// ```
/// use cayley_bessel::kernels::continued_fraction;
///
/// // 1 + 1/(1 + 1/(1 + ...)) = golden ratio
/// let phi = continued_fraction(1.0_f64, |_| (1.0, 1.0), 200);
/// assert!((phi - 1.618033988749895).abs() < 1e-14);
/// ```
pub fn continued_fraction<Z, F>(b0: Z, terms: F, depth_cap: usize) -> Z
where
    Z: Algebra,
    F: FnMut(usize) -> (Z, Z),
{
    lentz(b0, <MaskOf<Z> as Mask>::splat(true), depth_cap, terms)
}

pub(crate) fn lentz<Z, F>(b0: Z, active: MaskOf<Z>, cap: usize, mut terms: F) -> Z
where
    Z: Algebra,
    F: FnMut(usize) -> (Z, Z),
{
    let tiny = Z::from_real(<Z::Lane as Lane>::splat(
        <ScalarOf<Z> as BesselFloat>::MACH_TINY * <ScalarOf<Z> as BesselFloat>::from_f64(16.0),
    ));
    let one = Z::from_real(<Z::Lane as Lane>::from_f64(1.0));
    let tol = <Z::Lane as Lane>::splat(<ScalarOf<Z> as BesselFloat>::tol());

    let mut f = Z::blend(b0.all_zero(), tiny, b0);
    let mut c = f;
    let mut d = Z::zero();
    let mut done = !active | f.any_nan();
    let mut k = 0;
    while !done.all() {
        if k == cap {
            debug!(target: "cayley_bessel", depth = cap, "continued fraction did not converge");
            return Z::blend(done, f, failed());
        }
        k += 1;
        let (a, b) = terms(k);
        d = b + a * d;
        d = Z::blend(d.all_zero(), tiny, d);
        c = b + a * c.recip();
        c = Z::blend(c.all_zero(), tiny, c);
        d = d.recip();
        let delta = c * d;
        let live = !done;
        f = Z::blend(live, f * delta, f);
        let settled = abs(delta - one).simd_le(tol);
        done = done | (live & (settled | f.any_nan()));
    }
    f
}
