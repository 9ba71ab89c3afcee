//! Optimally truncated asymptotic series.

use crate::cayley::{abs, Algebra};
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;

type MaskOf<Z> = <<Z as Algebra>::Lane as Lane>::Mask;
type ScalarOf<Z> = <<Z as Algebra>::Lane as Lane>::Scalar;

/// Coefficients `a_k(ν)` of Hankel's expansions,
///
/// `a_k(ν) = (4ν² − 1²)(4ν² − 3²)···(4ν² − (2k−1)²) / (k! 8^k)`,
///
/// shared by the large-argument forms of I, K, J, Y and H. For
/// half-integer ν the sequence reaches exact zeros and the expansion
/// terminates.
#[derive(Clone, Debug)]
pub struct HankelCoefficients<T> {
    mu: T,
    a: T,
    k: u32,
}

impl<T: BesselFloat> HankelCoefficients<T> {
    pub fn new(nu: T) -> Self {
        HankelCoefficients {
            mu: T::from_f64(4.0) * nu * nu,
            a: T::one(),
            k: 0,
        }
    }
}

impl<T: BesselFloat> Iterator for HankelCoefficients<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let out = self.a;
        self.k += 1;
        let odd = T::from_f64((2 * self.k - 1) as f64);
        self.a = self.a * (self.mu - odd * odd) / T::from_f64((8 * self.k) as f64);
        Some(out)
    }
}

/// Partial sum of `Σ a_k w^k` truncated at its smallest term.
///
/// Per lane, summation stops before the first term that is larger than
/// its predecessor, or after a term at most machine tolerance relative to
/// the sum, or after [`BesselFloat::asymptotic_cap`] terms.
///
/// ```
/// use cayley_bessel::kernels::{asymptotic_series, HankelCoefficients};
///
/// // K_{1/2} terminates after the first term
/// let s = asymptotic_series(HankelCoefficients::new(0.5_f64), 0.1_f64);
/// assert_eq!(s, 1.0);
/// ```
pub fn asymptotic_series<Z, I>(coeffs: I, w: Z) -> Z
where
    Z: Algebra,
    I: IntoIterator<Item = ScalarOf<Z>>,
{
    sum_asymptotic(coeffs, w, <MaskOf<Z> as Mask>::splat(true))
}

pub(crate) fn sum_asymptotic<Z, I>(coeffs: I, w: Z, active: MaskOf<Z>) -> Z
where
    Z: Algebra,
    I: IntoIterator<Item = ScalarOf<Z>>,
{
    let tol = <Z::Lane as Lane>::splat(<ScalarOf<Z> as BesselFloat>::tol());
    let cap = <ScalarOf<Z> as BesselFloat>::asymptotic_cap();
    let mut sum = Z::zero();
    let mut wk = Z::from_real(<Z::Lane as Lane>::from_f64(1.0));
    let mut prev = <Z::Lane as Lane>::splat(<ScalarOf<Z> as num_traits::Float>::infinity());
    let mut done = !active;
    for a in coeffs.into_iter().take(cap) {
        if done.all() {
            break;
        }
        let term = wk.scale(<Z::Lane as Lane>::splat(a));
        let at = abs(term);
        let live = !done;
        let grows = at.simd_gt(prev);
        sum = Z::blend(live & !grows, sum + term, sum);
        let small = at.simd_le(tol * abs(sum));
        done = done | (live & (grows | small | term.any_nan()));
        prev = at;
        wk = wk * w;
    }
    sum
}
