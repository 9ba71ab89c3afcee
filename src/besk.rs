//! K Bessel function driver.
//!
//! Adapted from ZBESK in TOMS 644. K is even in the order, so the sign of
//! ν only changes the orders reported for z = 0.

use crate::algo::acon::modified_k;
use crate::algo::edge::{finish, screen, split_order};
use crate::algo::sweep::Sink;
use crate::cayley::Complex;
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;
use crate::types::Family;

/// Store `K_{±(ν0+k)}(z)` for the offsets `out` wants.
pub(crate) fn besk<L: Lane, S: Sink<L>>(z: Complex<L>, nu: L::Scalar, out: &mut S) {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let sc = screen(z);
    let (nu0, n, neg) = split_order(nu);
    if sc.active.any() {
        modified_k(sc.z, nu0, n, sc.active, out);
    }
    let sign = if neg { -t(1.0) } else { t(1.0) };
    finish(Family::K, &sc, |k| sign * (nu0 + t(k as f64)), out);
}
