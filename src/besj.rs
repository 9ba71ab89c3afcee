//! J Bessel function driver.
//!
//! Adapted from ZBESJ in TOMS 644. Nonnegative orders go straight to the
//! cylinder continuation; negative non-integer orders use
//! `J_{-μ} = cos(μπ) J_μ - sin(μπ) Y_μ`, and `J_{-n} = (-1)^n J_n`.

use crate::algo::acon::cylinder;
use crate::algo::edge::{finish, screen, split_order};
use crate::algo::sweep::Sink;
use crate::cayley::Complex;
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;
use crate::types::Family;
use crate::utils::{cispi, combine};

/// Store `J_{±(ν0+k)}(z)` for the offsets `out` wants, where |ν| = ν0 + n
/// and the sign is the sign of ν.
pub(crate) fn besj<L: Lane, S: Sink<L>>(z: Complex<L>, nu: L::Scalar, out: &mut S) {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let sc = screen(z);
    let (nu0, n, neg) = split_order(nu);

    if sc.active.any() {
        if neg && nu0 != t(0.0) {
            let mut y = out.twin();
            cylinder(sc.z, nu0, n, sc.active, &mut [(Family::J, &mut *out), (Family::Y, &mut y)]);
            for k in out.range() {
                let (c, s) = cispi(nu0 + t(k as f64));
                out.put(k, combine(out.get(k), c, y.get(k), -s), sc.active);
            }
        } else {
            cylinder(sc.z, nu0, n, sc.active, &mut [(Family::J, &mut *out)]);
            if neg {
                for k in out.range().filter(|k| k % 2 == 1) {
                    out.put(k, -out.get(k), sc.active);
                }
            }
        }
    }

    let sign = if neg { -t(1.0) } else { t(1.0) };
    finish(Family::J, &sc, |k| sign * (nu0 + t(k as f64)), out);
}
