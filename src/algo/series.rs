//! Power series summation with per-lane convergence.

use tracing::debug;

use crate::cayley::{abs, Algebra};
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;
use crate::sentinel::failed;

type MaskOf<Z> = <<Z as Algebra>::Lane as Lane>::Mask;
type ScalarOf<Z> = <<Z as Algebra>::Lane as Lane>::Scalar;

/// Sum `first + t_1 + t_2 + ...` where `t_k = next(k, t_{k-1})`.
///
/// Each lane stops once its last added term is at most `tol` times its
/// running sum. Lanes still short of that after
/// [`BesselFloat::series_cap`] terms come back as `failed`.
///
/// ```
/// use cayley_bessel::kernels::power_series_sum;
/// use cayley_bessel::Complex;
///
/// // exp(1 + i) = Σ z^k / k!
/// let z = Complex::new(1.0_f64, 1.0);
/// let e = power_series_sum(Complex::new(1.0_f64, 0.0), |k, t| t * z / k as f64, 1e-16);
/// assert!((e.re() - 1.4686939399158851).abs() < 1e-14);
/// ```
pub fn power_series_sum<Z, F>(first: Z, next: F, tol: ScalarOf<Z>) -> Z
where
    Z: Algebra,
    F: FnMut(usize, Z) -> Z,
{
    sum_series(
        first,
        <MaskOf<Z> as Mask>::splat(true),
        tol,
        <ScalarOf<Z> as BesselFloat>::series_cap(),
        next,
    )
}

/// Masked form of [`power_series_sum`]; inactive lanes are returned as
/// `first` and do not hold the loop open.
pub(crate) fn sum_series<Z, F>(first: Z, active: MaskOf<Z>, tol: ScalarOf<Z>, cap: usize, mut next: F) -> Z
where
    Z: Algebra,
    F: FnMut(usize, Z) -> Z,
{
    let tol = <Z::Lane as Lane>::splat(tol);
    let mut sum = first;
    let mut term = first;
    let mut done = !active | first.any_nan();
    let mut k = 0;
    while !done.all() {
        if k == cap {
            debug!(target: "cayley_bessel", terms = cap, "power series did not converge");
            return Z::blend(done, sum, failed());
        }
        k += 1;
        term = next(k, term);
        let live = !done;
        sum = Z::blend(live, sum + term, sum);
        let small = abs(term).simd_le(tol * abs(sum));
        done = done | (live & (small | sum.any_nan()));
    }
    sum
}
