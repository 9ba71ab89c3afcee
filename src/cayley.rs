//! Cayley-Dickson values: reals, complex numbers, quaternions, octonions and
//! sedenions over scalar or SIMD lanes.
//!
//! An order-2^k value is a pair `(a, b)` of order-2^(k-1) values; order 1 is
//! a bare [`Lane`]. The [`Algebra`] trait is implemented recursively, so one
//! generic routine covers every order and lane type.
//!
//! The operators `+ - * /` are the raw Cayley-Dickson formulas with plain
//! IEEE behaviour per component. The sentinel-aware operations (complex
//! infinity, failed) are the free functions of [`crate::arith`].

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::Float;
use wide::{f32x4, f32x8, f64x2, f64x4};

use crate::lane::{Lane, Mask};

type MaskOf<Z> = <<Z as Algebra>::Lane as Lane>::Mask;

/// A value of a Cayley-Dickson algebra.
///
/// Flat components are numbered 0..ORDER: component 0 is the real part,
/// components 1.. are the imaginary units (`i, j, k, l, ...`).
pub trait Algebra:
    Copy
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Real leaf type.
    type Lane: Lane;
    /// Number of real components (1, 2, 4, 8, 16).
    const ORDER: usize;

    fn zero() -> Self;
    /// Value with real part `x` and zero imaginary parts.
    fn from_real(x: Self::Lane) -> Self;
    /// Value with every component equal to `x`.
    fn splat_all(x: Self::Lane) -> Self;

    /// Flat component `i`.
    fn component(&self, i: usize) -> Self::Lane;
    /// Overwrite flat component `i`.
    fn set_component(&mut self, i: usize, v: Self::Lane);

    /// Conjugate: identity on the reals, `(conj a, -b)` above.
    fn conj(self) -> Self;
    /// Multiply every component by a real lane.
    fn scale(self, s: Self::Lane) -> Self;
    /// Sum of squared components.
    fn norm(self) -> Self::Lane;
    /// Largest component magnitude.
    fn max_abs(self) -> Self::Lane;
    /// Raw multiplicative inverse `conj(y) / norm(y)`, scaled against overflow.
    fn recip(self) -> Self;

    fn any_nan(self) -> MaskOf<Self>;
    fn any_inf(self) -> MaskOf<Self>;
    fn all_zero(self) -> MaskOf<Self>;

    /// Lane-wise choice between two values.
    fn blend(mask: MaskOf<Self>, if_true: Self, if_false: Self) -> Self;
    /// Apply a lane function to every component.
    fn map_lanes(self, f: impl Fn(Self::Lane) -> Self::Lane + Copy) -> Self;

    /// Build from flat components; missing components are zero.
    fn from_components(c: &[Self::Lane]) -> Self {
        let mut v = Self::zero();
        for (i, x) in c.iter().take(Self::ORDER).enumerate() {
            v.set_component(i, *x);
        }
        v
    }

    /// Real part.
    #[inline]
    fn real(&self) -> Self::Lane {
        self.component(0)
    }
}

impl<L: Lane> Algebra for L {
    type Lane = L;
    const ORDER: usize = 1;

    #[inline]
    fn zero() -> L {
        L::from_f64(0.0)
    }
    #[inline]
    fn from_real(x: L) -> L {
        x
    }
    #[inline]
    fn splat_all(x: L) -> L {
        x
    }
    #[inline]
    fn component(&self, i: usize) -> L {
        debug_assert_eq!(i, 0);
        *self
    }
    #[inline]
    fn set_component(&mut self, i: usize, v: L) {
        debug_assert_eq!(i, 0);
        *self = v;
    }
    #[inline]
    fn conj(self) -> L {
        self
    }
    #[inline]
    fn scale(self, s: L) -> L {
        self * s
    }
    #[inline]
    fn norm(self) -> L {
        self * self
    }
    #[inline]
    fn max_abs(self) -> L {
        self.abs()
    }
    #[inline]
    fn recip(self) -> L {
        L::from_f64(1.0) / self
    }
    #[inline]
    fn any_nan(self) -> L::Mask {
        self.is_nan()
    }
    #[inline]
    fn any_inf(self) -> L::Mask {
        self.is_infinite()
    }
    #[inline]
    fn all_zero(self) -> L::Mask {
        self.simd_eq(L::from_f64(0.0))
    }
    #[inline]
    fn blend(mask: L::Mask, if_true: L, if_false: L) -> L {
        L::select(mask, if_true, if_false)
    }
    #[inline]
    fn map_lanes(self, f: impl Fn(L) -> L + Copy) -> L {
        f(self)
    }
}

/// Cayley-Dickson pair `(a, b)`, standing for `a + b·e` where `e` is the new
/// imaginary unit introduced at this level.
#[derive(Clone, Copy, Debug)]
pub struct Cayley<A> {
    pub a: A,
    pub b: A,
}

/// Order-2 value.
pub type Complex<L> = Cayley<L>;
/// Order-4 value.
pub type Quaternion<L> = Cayley<Complex<L>>;
/// Order-8 value.
pub type Octonion<L> = Cayley<Quaternion<L>>;
/// Order-16 value.
pub type Sedenion<L> = Cayley<Octonion<L>>;

impl<A> Cayley<A> {
    #[inline]
    pub const fn pair(a: A, b: A) -> Self {
        Cayley { a, b }
    }
}

impl<L: Lane> Cayley<L> {
    /// Complex number `re + i·im`.
    #[inline]
    pub fn new(re: L, im: L) -> Self {
        Cayley { a: re, b: im }
    }

    #[inline]
    pub fn re(&self) -> L {
        self.a
    }

    #[inline]
    pub fn im(&self) -> L {
        self.b
    }

    /// The imaginary unit.
    #[inline]
    pub fn i() -> Self {
        Cayley::new(L::from_f64(0.0), L::from_f64(1.0))
    }
}

impl<A: Algebra> Algebra for Cayley<A> {
    type Lane = A::Lane;
    const ORDER: usize = 2 * A::ORDER;

    #[inline]
    fn zero() -> Self {
        Cayley::pair(A::zero(), A::zero())
    }
    #[inline]
    fn from_real(x: A::Lane) -> Self {
        Cayley::pair(A::from_real(x), A::zero())
    }
    #[inline]
    fn splat_all(x: A::Lane) -> Self {
        Cayley::pair(A::splat_all(x), A::splat_all(x))
    }
    #[inline]
    fn component(&self, i: usize) -> A::Lane {
        if i < A::ORDER {
            self.a.component(i)
        } else {
            self.b.component(i - A::ORDER)
        }
    }
    #[inline]
    fn set_component(&mut self, i: usize, v: A::Lane) {
        if i < A::ORDER {
            self.a.set_component(i, v)
        } else {
            self.b.set_component(i - A::ORDER, v)
        }
    }
    #[inline]
    fn conj(self) -> Self {
        Cayley::pair(self.a.conj(), -self.b)
    }
    #[inline]
    fn scale(self, s: A::Lane) -> Self {
        Cayley::pair(self.a.scale(s), self.b.scale(s))
    }
    #[inline]
    fn norm(self) -> A::Lane {
        self.a.norm() + self.b.norm()
    }
    #[inline]
    fn max_abs(self) -> A::Lane {
        self.a.max_abs().max(self.b.max_abs())
    }
    fn recip(self) -> Self {
        // Same scaling as Amos ZDIV: divide out the largest component first.
        let m = self.max_abs();
        let inv_m = <A::Lane as Lane>::from_f64(1.0) / m;
        let ys = self.scale(inv_m);
        ys.conj().scale(inv_m / ys.norm())
    }
    #[inline]
    fn any_nan(self) -> MaskOf<Self> {
        self.a.any_nan() | self.b.any_nan()
    }
    #[inline]
    fn any_inf(self) -> MaskOf<Self> {
        self.a.any_inf() | self.b.any_inf()
    }
    #[inline]
    fn all_zero(self) -> MaskOf<Self> {
        self.a.all_zero() & self.b.all_zero()
    }
    #[inline]
    fn blend(mask: MaskOf<Self>, if_true: Self, if_false: Self) -> Self {
        Cayley::pair(
            A::blend(mask, if_true.a, if_false.a),
            A::blend(mask, if_true.b, if_false.b),
        )
    }
    #[inline]
    fn map_lanes(self, f: impl Fn(A::Lane) -> A::Lane + Copy) -> Self {
        Cayley::pair(self.a.map_lanes(f), self.b.map_lanes(f))
    }
}

impl<A: Algebra> Default for Cayley<A> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<A: Algebra> Add for Cayley<A> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Cayley::pair(self.a + rhs.a, self.b + rhs.b)
    }
}

impl<A: Algebra> Sub for Cayley<A> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Cayley::pair(self.a - rhs.a, self.b - rhs.b)
    }
}

impl<A: Algebra> Neg for Cayley<A> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Cayley::pair(-self.a, -self.b)
    }
}

impl<A: Algebra> Mul for Cayley<A> {
    type Output = Self;
    /// `(a, b)(c, d) = (ac - d̄b, da + bc̄)`
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let (a, b, c, d) = (self.a, self.b, rhs.a, rhs.b);
        Cayley::pair(a * c - d.conj() * b, d * a + b * c.conj())
    }
}

impl<A: Algebra> Div for Cayley<A> {
    type Output = Self;
    /// Right division `x · y⁻¹`.
    #[inline]
    fn div(self, rhs: Self) -> Self {
        self * rhs.recip()
    }
}

impl<A: Algebra> AddAssign for Cayley<A> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<A: Algebra> SubAssign for Cayley<A> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<A: Algebra> MulAssign for Cayley<A> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<A: Algebra> PartialEq for Cayley<A> {
    /// Structural equality; two failed values compare equal.
    fn eq(&self, other: &Self) -> bool {
        crate::sentinel::is_equal(*self, *other).all()
    }
}

macro_rules! lane_operators {
    ($($l:ty),*) => {$(
        impl<A: Algebra<Lane = $l>> Add<$l> for Cayley<A> {
            type Output = Self;
            #[inline]
            fn add(self, rhs: $l) -> Self {
                self + Self::from_real(rhs)
            }
        }
        impl<A: Algebra<Lane = $l>> Sub<$l> for Cayley<A> {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: $l) -> Self {
                self - Self::from_real(rhs)
            }
        }
        impl<A: Algebra<Lane = $l>> Mul<$l> for Cayley<A> {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: $l) -> Self {
                self.scale(rhs)
            }
        }
        impl<A: Algebra<Lane = $l>> Div<$l> for Cayley<A> {
            type Output = Self;
            #[inline]
            fn div(self, rhs: $l) -> Self {
                self.scale(<$l as Lane>::from_f64(1.0) / rhs)
            }
        }
        impl<A: Algebra<Lane = $l>> Add<Cayley<A>> for $l {
            type Output = Cayley<A>;
            #[inline]
            fn add(self, rhs: Cayley<A>) -> Cayley<A> {
                Cayley::<A>::from_real(self) + rhs
            }
        }
        impl<A: Algebra<Lane = $l>> Sub<Cayley<A>> for $l {
            type Output = Cayley<A>;
            #[inline]
            fn sub(self, rhs: Cayley<A>) -> Cayley<A> {
                Cayley::<A>::from_real(self) - rhs
            }
        }
        impl<A: Algebra<Lane = $l>> Mul<Cayley<A>> for $l {
            type Output = Cayley<A>;
            #[inline]
            fn mul(self, rhs: Cayley<A>) -> Cayley<A> {
                rhs.scale(self)
            }
        }
        impl<A: Algebra<Lane = $l>> Div<Cayley<A>> for $l {
            type Output = Cayley<A>;
            #[inline]
            fn div(self, rhs: Cayley<A>) -> Cayley<A> {
                rhs.recip().scale(self)
            }
        }
    )*};
}

lane_operators!(f32, f64, f32x4, f32x8, f64x2, f64x4);

macro_rules! num_complex_interop {
    ($($t:ty),*) => {$(
        impl From<num_complex::Complex<$t>> for Cayley<$t> {
            #[inline]
            fn from(z: num_complex::Complex<$t>) -> Self {
                Cayley::new(z.re, z.im)
            }
        }
        impl From<Cayley<$t>> for num_complex::Complex<$t> {
            #[inline]
            fn from(z: Cayley<$t>) -> Self {
                num_complex::Complex::new(z.a, z.b)
            }
        }
    )*};
}

num_complex_interop!(f32, f64);

/// Overflow-safe Euclidean magnitude `sqrt(norm(x))`.
pub fn abs<Z: Algebra>(x: Z) -> Z::Lane {
    let m = x.max_abs();
    let zero = <Z::Lane as Lane>::from_f64(0.0);
    let safe = <Z::Lane as Lane>::select(m.simd_eq(zero), <Z::Lane as Lane>::from_f64(1.0), m);
    let r = x.scale(<Z::Lane as Lane>::from_f64(1.0) / safe).norm().sqrt() * safe;
    // infinite components make the scaled norm NaN; the magnitude is still +inf
    <Z::Lane as Lane>::select(
        x.any_inf() & !x.any_nan(),
        <Z::Lane as Lane>::splat(<<Z::Lane as Lane>::Scalar as Float>::infinity()),
        r,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(c: [f64; 4]) -> Quaternion<f64> {
        Quaternion::from_components(&c)
    }

    fn unit<Z: Algebra<Lane = f64>>(k: usize) -> Z {
        let mut v = Z::zero();
        v.set_component(k, 1.0);
        v
    }

    #[test]
    fn complex_product_matches_num_complex() {
        let x = Complex::new(1.5_f64, -2.0);
        let y = Complex::new(0.25_f64, 3.0);
        let p: num_complex::Complex<f64> = (x * y).into();
        let e = num_complex::Complex::new(1.5, -2.0) * num_complex::Complex::new(0.25, 3.0);
        assert_eq!(p, e);
    }

    #[test]
    fn quaternion_units_anticommute() {
        let (i, j, k) = (unit::<Quaternion<f64>>(1), unit::<Quaternion<f64>>(2), unit::<Quaternion<f64>>(3));
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
        assert_eq!(j * k, i);
        assert_eq!(k * i, j);
        assert!(i * j != j * i);
        assert_eq!(i * i, q([-1.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn quaternion_hand_product() {
        // (1 + 2i + 3j + 4k)(5 + 6i + 7j + 8k) = -60 + 12i + 30j + 24k
        let p = q([1.0, 2.0, 3.0, 4.0]) * q([5.0, 6.0, 7.0, 8.0]);
        assert_eq!(p, q([-60.0, 12.0, 30.0, 24.0]));
        let r = q([5.0, 6.0, 7.0, 8.0]) * q([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(r, q([-60.0, 20.0, 14.0, 32.0]));
    }

    #[test]
    fn octonions_are_not_associative() {
        let e1 = unit::<Octonion<f64>>(1);
        let e2 = unit::<Octonion<f64>>(2);
        let e4 = unit::<Octonion<f64>>(4);
        let e7 = unit::<Octonion<f64>>(7);
        assert_eq!(e1 * e2, unit::<Octonion<f64>>(3));
        assert_eq!(e2 * e4, unit::<Octonion<f64>>(6));
        assert_eq!((e1 * e2) * e4, e7);
        assert_eq!(e1 * (e2 * e4), -e7);
    }

    #[test]
    fn conj_and_norm() {
        let o = Octonion::<f64>::from_components(&[1.0, -2.0, 3.0, 0.5, 0.0, 4.0, -1.0, 2.0]);
        assert_eq!(o.conj().conj(), o);
        assert_eq!(o.norm(), 1.0 + 4.0 + 9.0 + 0.25 + 16.0 + 1.0 + 4.0);
        let p = o * o.conj();
        assert!((p.real() - o.norm()).abs() < 1e-12);
        for k in 1..8 {
            assert!(p.component(k).abs() < 1e-12);
        }
    }

    #[test]
    fn recip_survives_huge_components() {
        let z = Complex::new(1e300_f64, 1e300);
        let r = z.recip();
        assert!((r.re() - 0.5e-300).abs() < 1e-310);
        assert!((r.im() + 0.5e-300).abs() < 1e-310);
        assert_eq!(abs(z), 1e300 * 2f64.sqrt());
    }

    #[test]
    fn lane_scalar_operators() {
        let z = Complex::new(1.0_f64, 2.0);
        assert_eq!(2.0 * z, Complex::new(2.0, 4.0));
        assert_eq!(z + 1.0, Complex::new(2.0, 2.0));
        assert_eq!(1.0 - z, Complex::new(0.0, -2.0));
        let w = Complex::new(f64x4::splat(1.0), f64x4::splat(2.0)) * f64x4::splat(3.0);
        assert_eq!(w.im().to_array(), [6.0; 4]);
    }

    #[test]
    fn sedenion_components_roundtrip() {
        let c: [f64; 16] = core::array::from_fn(|i| i as f64);
        let s = Sedenion::<f64>::from_components(&c);
        assert_eq!(<Sedenion<f64> as Algebra>::ORDER, 16);
        for (i, x) in c.iter().enumerate() {
            assert_eq!(s.component(i), *x);
        }
    }
}
