//! Sentinel-aware arithmetic over mixed orders and lane types.
//!
//! Operands are promoted to their common type first. On real (order 1)
//! values the results are plain IEEE. Above that, non-finite outcomes are
//! mapped onto the two sentinels lane by lane:
//!
//! * any `failed` operand gives `failed`;
//! * `0 · ∞` and `∞ ± ∞` give `failed`;
//! * any other infinite operand, or an overflow of finite operands, gives
//!   `complex_infinity`.

use crate::cayley::Algebra;
use crate::lane::Lane;
use crate::promote::{Combine, Promoted};
use crate::sentinel::{canonicalize, complex_infinity, failed, is_infinite};

type MaskOf<Z> = <<Z as Algebra>::Lane as Lane>::Mask;

#[inline]
fn settle<Z: Algebra>(raw: Z, fail: MaskOf<Z>, inf: MaskOf<Z>) -> Z {
    let r = Z::blend(inf | raw.any_inf() | raw.any_nan(), complex_infinity(), raw);
    Z::blend(fail, failed(), r)
}

/// `x + y`.
pub fn add<X: Combine<Y>, Y: Algebra>(x: X, y: Y) -> Promoted<X, Y> {
    let (x, y) = (x.lift_left(), X::lift_right(y));
    additive(x, y, x + y)
}

/// `x - y`.
pub fn sub<X: Combine<Y>, Y: Algebra>(x: X, y: Y) -> Promoted<X, Y> {
    let (x, y) = (x.lift_left(), X::lift_right(y));
    additive(x, y, x - y)
}

fn additive<Z: Algebra>(x: Z, y: Z, raw: Z) -> Z {
    if Z::ORDER == 1 {
        return raw;
    }
    let (xi, yi) = (is_infinite(x), is_infinite(y));
    settle(raw, x.any_nan() | y.any_nan() | (xi & yi), xi | yi)
}

/// Cayley-Dickson product `x · y`.
pub fn mul<X: Combine<Y>, Y: Algebra>(x: X, y: Y) -> Promoted<X, Y> {
    product(x.lift_left(), X::lift_right(y))
}

fn product<Z: Algebra>(x: Z, y: Z) -> Z {
    let raw = x * y;
    if Z::ORDER == 1 {
        return raw;
    }
    let (xi, yi) = (is_infinite(x), is_infinite(y));
    let fail = x.any_nan() | y.any_nan() | (xi & y.all_zero()) | (yi & x.all_zero());
    settle(raw, fail, xi | yi)
}

/// Right quotient `x · y⁻¹`.
pub fn div<X: Combine<Y>, Y: Algebra>(x: X, y: Y) -> Promoted<X, Y> {
    let (x, y) = (x.lift_left(), X::lift_right(y));
    product(x, inverse(y))
}

/// Multiplicative inverse `conj(y) / norm(y)`.
///
/// The inverse of zero is `complex_infinity` and the inverse of
/// `complex_infinity` is zero.
pub fn inverse<Z: Algebra>(y: Z) -> Z {
    let raw = y.recip();
    if Z::ORDER == 1 {
        return raw;
    }
    let r = Z::blend(y.all_zero(), complex_infinity(), raw);
    let r = Z::blend(is_infinite(y), Z::zero(), r);
    Z::blend(y.any_nan(), failed(), r)
}

/// Conjugate.
pub fn conj<Z: Algebra>(x: Z) -> Z {
    canonicalize(x.conj())
}

/// Negation.
pub fn neg<Z: Algebra>(x: Z) -> Z {
    canonicalize(-x)
}

/// Sum of squared components.
pub fn norm<Z: Algebra>(x: Z) -> Z::Lane {
    x.norm()
}
