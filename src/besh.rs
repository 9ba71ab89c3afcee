//! Hankel function driver.
//!
//! Adapted from ZBESH in TOMS 644. Both kinds come from the cylinder
//! continuation; negative orders use `H1_{-μ} = e^{iμπ} H1_μ` and
//! `H2_{-μ} = e^{-iμπ} H2_μ`.

use crate::algo::acon::cylinder;
use crate::algo::edge::{finish, screen, split_order};
use crate::algo::sweep::Sink;
use crate::cayley::Complex;
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;
use crate::types::Family;
use crate::utils::{cispi, rotate};

/// Store `H1_{±(ν0+k)}(z)` or `H2_{±(ν0+k)}(z)` for the offsets `out`
/// wants. `family` is [`Family::H1`] or [`Family::H2`].
pub(crate) fn besh<L: Lane, S: Sink<L>>(family: Family, z: Complex<L>, nu: L::Scalar, out: &mut S) {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let sc = screen(z);
    let (nu0, n, neg) = split_order(nu);

    if sc.active.any() {
        cylinder(sc.z, nu0, n, sc.active, &mut [(family, &mut *out)]);
        if neg {
            let turn = if family == Family::H1 { t(1.0) } else { -t(1.0) };
            for k in out.range() {
                let (c, s) = cispi(nu0 + t(k as f64));
                out.put(k, rotate(out.get(k), c, turn * s), sc.active);
            }
        }
    }

    let sign = if neg { -t(1.0) } else { t(1.0) };
    finish(family, &sc, |k| sign * (nu0 + t(k as f64)), out);
}
