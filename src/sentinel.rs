//! The two special values of every algebra and their predicates.
//!
//! `complex_infinity` has every leaf `+∞`; `failed` has every leaf NaN. Both
//! are ordinary values built from the type alone, so they need no cache and
//! compare structurally. Predicates return one boolean per lane.

use num_traits::Float;

use crate::cayley::Algebra;
use crate::lane::{Lane, Mask};

type MaskOf<Z> = <<Z as Algebra>::Lane as Lane>::Mask;
type ScalarOf<Z> = <<Z as Algebra>::Lane as Lane>::Scalar;

/// The infinite value of unspecified direction.
#[inline]
pub fn complex_infinity<Z: Algebra>() -> Z {
    Z::splat_all(<Z::Lane as Lane>::splat(<ScalarOf<Z> as Float>::infinity()))
}

/// The propagating "no value" of the algebra.
#[inline]
pub fn failed<Z: Algebra>() -> Z {
    Z::splat_all(<Z::Lane as Lane>::splat(<ScalarOf<Z> as Float>::nan()))
}

/// Some leaf is infinite and no leaf is NaN.
#[inline]
pub fn is_infinite<Z: Algebra>(x: Z) -> MaskOf<Z> {
    x.any_inf() & !x.any_nan()
}

/// Some leaf is NaN.
#[inline]
pub fn is_failed<Z: Algebra>(x: Z) -> MaskOf<Z> {
    x.any_nan()
}

/// Alias of [`is_failed`].
#[inline]
pub fn is_nan<Z: Algebra>(x: Z) -> MaskOf<Z> {
    x.any_nan()
}

/// Neither infinite nor failed.
#[inline]
pub fn is_finite<Z: Algebra>(x: Z) -> MaskOf<Z> {
    !(x.any_inf() | x.any_nan())
}

/// Structural equality per lane: both failed, or every component equal.
pub fn is_equal<Z: Algebra>(x: Z, y: Z) -> MaskOf<Z> {
    let mut eq = <MaskOf<Z> as Mask>::splat(true);
    for i in 0..Z::ORDER {
        eq = eq & x.component(i).simd_eq(y.component(i));
    }
    eq | (x.any_nan() & y.any_nan())
}

/// Map non-finite lanes of a multi-component value onto the sentinels:
/// NaN anywhere gives `failed`, otherwise an infinite leaf gives
/// `complex_infinity`. Real values keep their IEEE meaning.
pub fn canonicalize<Z: Algebra>(x: Z) -> Z {
    if Z::ORDER == 1 {
        return x;
    }
    let nan = x.any_nan();
    let inf = x.any_inf() & !nan;
    let x = Z::blend(inf, complex_infinity(), x);
    Z::blend(nan, failed(), x)
}
