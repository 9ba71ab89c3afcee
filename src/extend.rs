//! Functions of a generalized-complex argument.
//!
//! Every function of this crate has a power series with real coefficients
//! (up to the branch factor `z^ν`), so it extends from the complex plane to
//! any Cayley-Dickson order. Write x = a + v with v purely imaginary and
//! ρ = |v|. The subalgebra spanned by 1 and v/ρ is a copy of the complex
//! numbers, hence
//!
//! `f(x) = Re w + Im w · v/ρ` with `w = f(a + iρ)`.
//!
//! When v = 0 the first imaginary unit stands in for v/ρ. Real arguments
//! are evaluated as complex numbers and complex arguments directly, so the
//! lower half-plane keeps its own branch.

use crate::cayley::{abs, Algebra, Complex};
use crate::lane::Lane;
use crate::promote::{Combine, Promoted};
use crate::sentinel::{complex_infinity, failed, is_infinite};

/// Argument types of the Bessel and Airy entry points.
///
/// Implemented for every algebra value; [`Argument::Value`] is the common
/// type of the argument and the complex numbers over its lane type, i.e.
/// complex for real and complex arguments and the argument's own type
/// above.
pub trait Argument: Algebra {
    /// Type of the function values.
    type Value: Algebra<Lane = Self::Lane>;
}

impl<Z> Argument for Z
where
    Z: Combine<Complex<<Z as Algebra>::Lane>>,
    Promoted<Z, Complex<<Z as Algebra>::Lane>>: Algebra<Lane = <Z as Algebra>::Lane>,
{
    type Value = Promoted<Z, Complex<<Z as Algebra>::Lane>>;
}

/// Imaginary part of `x` as a pure vector.
#[inline]
fn vector<Z: Algebra>(x: Z) -> Z {
    let mut v = x;
    v.set_component(0, <Z::Lane as Lane>::from_f64(0.0));
    v
}

/// The complex image `a + iρ` of `x`.
pub(crate) fn project<Z: Algebra>(x: Z) -> Complex<Z::Lane> {
    match Z::ORDER {
        1 => Complex::new(x.real(), <Z::Lane as Lane>::from_f64(0.0)),
        2 => Complex::new(x.component(0), x.component(1)),
        _ => Complex::new(x.real(), abs(vector(x))),
    }
}

/// Map a value of the complex image of `x` back along the imaginary
/// direction of `x`.
pub(crate) fn lift<Z: Argument>(x: Z, w: Complex<Z::Lane>) -> Z::Value {
    let zero = <Z::Lane as Lane>::from_f64(0.0);
    let mut out = Z::Value::zero();
    out.set_component(0, w.re());
    if Z::ORDER <= 2 {
        out.set_component(1, w.im());
        return out;
    }

    let rho = abs(vector(x));
    let flat = rho.simd_eq(zero);
    let s = w.im() / <Z::Lane as Lane>::select(flat, <Z::Lane as Lane>::from_f64(1.0), rho);
    for i in 1..Z::ORDER {
        out.set_component(i, x.component(i) * s);
    }
    out.set_component(1, <Z::Lane as Lane>::select(flat, w.im(), out.component(1)));

    let out = Z::Value::blend(is_infinite(w), complex_infinity(), out);
    Z::Value::blend(w.any_nan(), failed(), out)
}

#[cfg(test)]
mod tests {
    use wide::f64x2;

    use super::*;
    use crate::cayley::{Octonion, Quaternion};
    use crate::lane::Mask;
    use crate::utils::zexp;

    #[test]
    fn value_types() {
        use core::any::TypeId;
        assert_eq!(TypeId::of::<<f64 as Argument>::Value>(), TypeId::of::<Complex<f64>>());
        assert_eq!(TypeId::of::<<Complex<f32> as Argument>::Value>(), TypeId::of::<Complex<f32>>());
        assert_eq!(TypeId::of::<<Octonion<f64x2> as Argument>::Value>(), TypeId::of::<Octonion<f64x2>>());
    }

    #[test]
    fn projection_roundtrip() {
        let q = Quaternion::<f64>::from_components(&[0.5, 3.0, 0.0, -4.0]);
        let w = project(q);
        assert_eq!(w, Complex::new(0.5, 5.0));
        let back = lift(q, w);
        for i in 0..4 {
            assert!((back.component(i) - q.component(i)).abs() < 1e-15);
        }
    }

    #[test]
    fn quaternion_exponential() {
        // e^{a+v} = e^a (cos ρ + v/ρ sin ρ)
        let q = Quaternion::<f64>::from_components(&[0.25, 1.0, -2.0, 2.0]);
        let e = lift(q, zexp(project(q)));
        let (ea, rho) = (0.25_f64.exp(), 3.0_f64);
        assert!((e.component(0) - ea * rho.cos()).abs() < 1e-15);
        assert!((e.component(2) - ea * rho.sin() * -2.0 / 3.0).abs() < 1e-15);
        // f(x) commutes with x
        let d = e * q - q * e;
        assert!(d.max_abs() < 1e-14);
    }

    #[test]
    fn real_lanes_use_the_first_unit() {
        let o = Octonion::<f64x2>::from_components(&[f64x2::new([2.0, 2.0]), f64x2::new([0.0, 1.0])]);
        let w = Complex::new(f64x2::splat(1.0), f64x2::splat(3.0));
        let v = lift(o, w);
        assert_eq!(v.component(1).to_array(), [3.0, 3.0]);
        assert!(v.component(2).simd_eq(f64x2::splat(0.0)).all());
    }

    #[test]
    fn sentinels_fill_every_component() {
        let q = Quaternion::<f64>::from_components(&[1.0, 0.0, 1.0, 0.0]);
        let v = lift(q, Complex::new(f64::INFINITY, f64::INFINITY));
        assert!((0..4).all(|i| v.component(i) == f64::INFINITY));
        let v = lift(q, Complex::new(f64::NAN, 0.0));
        assert!((0..4).all(|i| v.component(i).is_nan()));
    }
}
