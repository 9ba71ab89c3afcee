//! Power series for I of real order.
//!
//! Adapted from ZSERI in TOMS 644:
//!
//! `I_ν(z) = (z/2)^ν / Γ(ν+1) · Σ_k (z²/4)^k / (k! (ν+1)_k)`
//!
//! The prefactor is carried as a separate logarithm, so large orders at
//! small |z| underflow only when the caller finally unscales.

use crate::algo::gamma::lgamma_signed;
use crate::algo::series::sum_series;
use crate::algo::sweep::unscale;
use crate::cayley::{Algebra, Complex};
use crate::lane::Lane;
use crate::machine::BesselFloat;
use crate::utils::zln;

/// `I_ν(z)` as `(unit, ln)` with `I_ν(z) = unit · e^{ln}`.
///
/// Any real ν with ν+1 not a pole of Γ. Inactive lanes are left out of
/// the convergence test and carry garbage.
pub(crate) fn seri_scaled<L: Lane>(z: Complex<L>, nu: L::Scalar, active: L::Mask) -> (Complex<L>, L) {
    let one = L::from_f64(1.0);
    let hz = z.scale(L::from_f64(0.5));
    let cz = hz * hz;
    let fnu = L::splat(nu);
    let sum = sum_series(
        Complex::from_real(one),
        active,
        <L::Scalar as BesselFloat>::tol(),
        <L::Scalar as BesselFloat>::series_cap(),
        |k, t| {
            let ak = L::splat(<L::Scalar as BesselFloat>::from_f64(k as f64));
            (t * cz).scale(one / (ak * (fnu + ak)))
        },
    );
    if nu == <L::Scalar as num_traits::Zero>::zero() {
        return (sum, L::from_f64(0.0));
    }

    // (z/2)^ν / Γ(ν+1) = exp(ν ln(z/2) - ln|Γ(ν+1)|) · sign
    let ck = zln(hz);
    let (lg, sign) = lgamma_signed(nu + <L::Scalar as num_traits::One>::one());
    let ln = ck.re() * fnu - L::splat(lg);
    let arg = ck.im() * fnu;
    let unit = sum * Complex::new(arg.cos(), arg.sin());
    (unit.scale(L::splat(sign)), ln)
}

/// `I_ν(z)` directly. Meant for |z| ≤ 2, where the prefactor stays in range.
pub(crate) fn seri<L: Lane>(z: Complex<L>, nu: L::Scalar, active: L::Mask) -> Complex<L> {
    let (unit, ln) = seri_scaled(z, nu, active);
    unscale(unit, ln)
}
