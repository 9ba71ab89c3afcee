//! Argument screening, order splitting and the values at z = 0.
//!
//! The engine only sees lanes with a finite nonzero argument. Every other
//! lane is parked at z = 1 while the engine runs and receives its value
//! from [`finish`] afterwards.

use num_traits::Float;

use crate::algo::sweep::Sink;
use crate::cayley::{Algebra, Complex};
use crate::lane::Lane;
use crate::machine::BesselFloat;
use crate::sentinel::{canonicalize, complex_infinity, failed};
use crate::types::Family;

/// Lane classes of an argument.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Screen<L: Lane> {
    /// The argument, with 1 in every lane that is not active and negative
    /// zeros made positive, so the negative real axis belongs to the upper
    /// half-plane.
    pub(crate) z: Complex<L>,
    /// Finite and nonzero.
    pub(crate) active: L::Mask,
    /// Exactly zero.
    pub(crate) zero: L::Mask,
    /// NaN or infinite.
    pub(crate) bad: L::Mask,
}

pub(crate) fn screen<L: Lane>(z: Complex<L>) -> Screen<L> {
    let bad = z.any_nan() | z.any_inf();
    let zero = !bad & z.all_zero();
    let active = !bad & !zero;
    let plus = L::from_f64(0.0);
    let z = Complex::new(z.re() + plus, z.im() + plus);
    Screen {
        z: Complex::blend(active, z, Complex::from_real(L::from_f64(1.0))),
        active,
        zero,
        bad,
    }
}

/// Split a signed order as |ν| = ν0 + n with 0 ≤ ν0 < 1. The flag is set
/// for negative orders.
pub(crate) fn split_order<T: BesselFloat>(nu: T) -> (T, usize, bool) {
    let a = nu.abs();
    let n = a.floor();
    (a - n, n.to_usize().unwrap_or(0), nu < T::zero())
}

/// `f_ν(0)` for a signed order.
pub(crate) fn at_zero<L: Lane>(family: Family, nu: L::Scalar) -> Complex<L> {
    let zero = <L::Scalar as num_traits::Zero>::zero();
    if !family.is_regular() {
        return complex_infinity();
    }
    if nu == zero {
        Complex::from_real(L::from_f64(1.0))
    } else if nu > zero || nu == nu.floor() {
        Complex::zero()
    } else {
        complex_infinity()
    }
}

/// Overwrite the parked lanes of every stored order and canonicalise.
/// `order(k)` is the signed order stored at offset k.
pub(crate) fn finish<L: Lane, S: Sink<L>>(
    family: Family,
    screen: &Screen<L>,
    order: impl Fn(usize) -> L::Scalar,
    out: &mut S,
) {
    for k in out.range() {
        let v = Complex::blend(screen.zero, at_zero(family, order(k)), out.get(k));
        let v = Complex::blend(screen.bad, failed(), v);
        out.set(k, canonicalize(v));
    }
}

#[cfg(test)]
mod tests {
    use wide::f64x4;

    use super::*;
    use crate::algo::sweep::Single;
    use crate::lane::Mask;
    use crate::sentinel::{is_failed, is_infinite};

    #[test]
    fn lanes_are_classified() {
        let z = Complex::new(f64x4::new([0.0, f64::NAN, 2.0, -0.0]), f64x4::new([0.0, 1.0, -1.0, f64::INFINITY]));
        let s = screen(z);
        assert!(s.zero.test(0) && !s.zero.test(1) && !s.zero.test(3));
        assert!(s.bad.test(1) && s.bad.test(3));
        assert!(s.active.test(2) && !s.active.test(0));
        assert_eq!(s.z.re().to_array(), [1.0, 1.0, 2.0, 1.0]);
        assert_eq!(s.z.im().to_array(), [0.0, 0.0, -1.0, 0.0]);
        let m = screen(Complex::new(-2.0_f64, -0.0));
        assert!(m.z.im().is_sign_positive());
    }

    #[test]
    fn order_split() {
        assert_eq!(split_order(3.25_f64), (0.25, 3, false));
        assert_eq!(split_order(-2.0_f64), (0.0, 2, true));
        assert_eq!(split_order(0.5_f32), (0.5, 0, false));
    }

    #[test]
    fn values_at_the_origin() {
        assert_eq!(at_zero::<f64>(Family::J, 0.0), Complex::new(1.0, 0.0));
        assert_eq!(at_zero::<f64>(Family::I, 2.5), Complex::new(0.0, 0.0));
        assert_eq!(at_zero::<f64>(Family::J, -3.0), Complex::new(0.0, 0.0));
        assert!(is_infinite(at_zero::<f64>(Family::J, -0.5)));
        assert!(is_infinite(at_zero::<f64>(Family::Y, 0.0)));
        assert!(is_infinite(at_zero::<f64>(Family::H1, 4.0)));
    }

    #[test]
    fn finish_fills_parked_lanes() {
        let s = screen(Complex::new(f64x4::new([0.0, f64::NAN, 1.0, 0.0]), f64x4::splat(0.0)));
        let mut out = Single::<f64x4>::new(0);
        out.set(0, Complex::new(f64x4::splat(0.5), f64x4::splat(0.0)));
        finish(Family::J, &s, |_| 0.0, &mut out);
        let v = out.value();
        assert_eq!(v.re().to_array()[0], 1.0);
        assert!(v.re().to_array()[1].is_nan() && v.im().to_array()[1].is_nan());
        assert_eq!(v.re().to_array()[2], 0.5);
        assert!(!is_failed(Complex::new(1.0_f64, 0.0)));
    }
}
