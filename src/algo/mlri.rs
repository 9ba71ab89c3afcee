//! Miller algorithm for I Bessel function, normalized by Neumann series.
//!
//! Adapted from ZMLRI in TOMS 644. The backward recurrence starts at an
//! index found by two forward test sweeps, runs down to order ν0, and is
//! normalised with
//!
//! `e^z = Σ_k (2ν0+2k) Γ(2ν0+k)/(k! Γ(2ν0+1)) · (z/2)^{-ν0} Γ(1+ν0) I_{ν0+k}(z)`
//!
//! All lanes share one sweep; a lane joins once the sweep reaches its own
//! start index, so each lane sees exactly the sequence it would see alone.

use num_traits::{Float, ToPrimitive};
use tracing::debug;

use crate::algo::gamma::gamln;
use crate::algo::sweep::{unscale, Sink};
use crate::cayley::{Algebra, Complex};
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;
use crate::utils::{reciprocal_z, zabs, zexp, zln};

/// Number of steps of each start-index test sweep.
const SEARCH: usize = 80;

/// Store `I_{ν0+k}(z)` for the offsets `out` wants, in the `active` lanes.
/// `n` is the top offset. Returns the lanes whose start-index search failed;
/// nothing is written in those.
pub(crate) fn mlri<L: Lane, S: Sink<L>>(z: Complex<L>, nu0: L::Scalar, n: usize, active: L::Mask, out: &mut S) -> L::Mask {
    let one = L::from_f64(1.0);
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let tol = L::splat(<L::Scalar as BesselFloat>::tol());

    let az = zabs(z);
    let iaz = az.floor();
    let rz = reciprocal_z(z);

    // Index from the relative truncation error of the series.
    let at = iaz + one;
    let mut ck = rz.scale(at * L::from_f64(0.5));
    let mut p1 = Complex::<L>::zero();
    let mut p2 = Complex::from_real(one);
    let ack = (at + one) / az;
    let rho = ack + (ack * ack - one).sqrt();
    let rho2 = rho * rho;
    let tst = (rho2 + rho2) / ((rho2 - one) * (rho - one)) / tol;
    let mut ak = at;
    let mut ival = L::from_f64(0.0);
    let mut found = !active;
    for i in 1..=SEARCH {
        if found.all() {
            break;
        }
        let pt = p2;
        p2 = p1 - ck * pt;
        p1 = pt;
        ck = ck + rz;
        let hit = !found & zabs(p2).simd_gt(tst * ak * ak);
        ival = L::select(hit, L::splat(t(i as f64)), ival);
        found = found | hit;
        ak = ak + one;
    }
    let mut fail = active & !found;

    // Index from the behaviour of the top order, needed when n ≥ |z|.
    let top = L::splat(t(n as f64));
    let second = active & !fail & top.simd_ge(iaz);
    let mut k = L::from_f64(0.0);
    if second.any() {
        let at = top + one;
        let mut ck = rz.scale(at * L::from_f64(0.5));
        let mut p1 = Complex::<L>::zero();
        let mut p2 = Complex::from_real(one);
        let mut tst = (at / az / tol).sqrt();
        let mut refined = !second;
        let mut done = !second;
        for kk in 1..=SEARCH {
            if done.all() {
                break;
            }
            let pt = p2;
            p2 = p1 - ck * pt;
            p1 = pt;
            ck = ck + rz;
            let ap = zabs(p2);
            let exceed = !done & ap.simd_ge(tst);
            let last = exceed & refined;
            k = L::select(last, L::splat(t(kk as f64)), k);
            done = done | last;
            let first = exceed & !refined;
            if first.any() {
                let ack = zabs(ck);
                let flam = ack + (ack * ack - one).sqrt();
                let fkap = ap / zabs(p1);
                let rho = flam.min(fkap);
                tst = L::select(first, tst * (rho / (rho * rho - one)).sqrt(), tst);
                refined = refined | first;
            }
        }
        fail = fail | (second & !done);
    }
    k = k + one;

    let kk = (ival + one + iaz).max(k + top);
    let cap = L::splat(t(<L::Scalar as BesselFloat>::miller_cap() as f64));
    fail = fail | (active & kk.simd_gt(cap));
    if fail.any() {
        debug!(target: "cayley_bessel", "Miller start index not found");
    }
    let ok = active & !fail;
    if ok.none() {
        return fail;
    }

    let kk = L::select(ok, kk, L::from_f64(0.0));
    let start = kk.reduce_max().to_usize().unwrap_or(0);
    let tfnu = nu0 + nu0;
    let tf = L::splat(tfnu);
    // bk = Γ(kk+2ν0+1) / (kk! Γ(2ν0+1))
    let mut bk = kk.map(|k| {
        (gamln(k + tfnu + <L::Scalar as num_traits::One>::one())
            - gamln(k + <L::Scalar as num_traits::One>::one())
            - gamln(tfnu + <L::Scalar as num_traits::One>::one()))
        .exp()
    });

    let big = L::splat(<L::Scalar as BesselFloat>::rescale_bound());
    let mut p1 = Complex::<L>::zero();
    let mut p2 = Complex::from_real(L::splat(<L::Scalar as BesselFloat>::miller_start()));
    let mut sum = Complex::<L>::zero();
    for c in (1..=start).rev() {
        let fc = L::splat(t(c as f64));
        let live = ok & fc.simd_le(kk);
        let pt = p2;
        let next = p1 + rz.scale(L::splat(nu0) + fc) * pt;
        let ak = one - tf / (fc + tf);
        let ack = bk * ak;
        sum = Complex::blend(live, sum + pt.scale(ack + bk), sum);
        bk = L::select(live, ack, bk);
        p1 = Complex::blend(live, pt, p1);
        p2 = Complex::blend(live, next, p2);

        let ap = zabs(p2);
        let over = live & ap.simd_gt(big);
        if over.any() {
            let f = L::select(over, one / ap, one);
            p1 = p1.scale(f);
            p2 = p2.scale(f);
            sum = sum.scale(f);
            out.rescale_from(c, f, over);
        }
        out.put(c - 1, p2, live);
    }
    sum = sum + p2;

    // I_{ν0+k} = p_k · e^z (z/2)^{ν0} / (Γ(1+ν0) · sum)
    let hz = z.scale(L::from_f64(0.5));
    let lg = gamln(nu0 + <L::Scalar as num_traits::One>::one());
    let e = z + zln(hz).scale(L::splat(nu0)) - Complex::from_real(L::splat(lg)) - zln(sum);
    let phase = zexp(Complex::new(L::from_f64(0.0), e.im()));
    for j in out.range() {
        let v = unscale(out.get(j) * phase, e.re());
        out.put(j, v, ok);
    }
    fail
}
