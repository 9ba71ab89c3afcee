//! Real leaf types ("lanes") of a Cayley-Dickson value.
//!
//! A lane is either a scalar float or a fixed-width SIMD vector from the
//! `wide` crate. Every numerical routine in this crate is written once
//! against [`Lane`] and runs unchanged on both: data-dependent decisions are
//! taken per lane through a [`Mask`] and merged with [`Lane::select`], never
//! through control flow on one lane's value.
//!
//! Transcendental functions on wide lanes are evaluated lane-by-lane through
//! the scalar routine, so a wide result is bit-identical to the scalar
//! results it packs.

use core::fmt::Debug;
use core::ops::{Add, BitAnd, BitOr, Div, Mul, Neg, Not, Sub};

use num_traits::Float;
#[allow(unused_imports)]
use wide::*;

use crate::machine::BesselFloat;

/// Per-lane boolean produced by lane comparisons.
pub trait Mask:
    Copy
    + Debug
    + Send
    + Sync
    + 'static
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
{
    /// Mask with every lane set to `b`.
    fn splat(b: bool) -> Self;
    /// True if at least one lane is set.
    fn any(self) -> bool;
    /// True if every lane is set.
    fn all(self) -> bool;
    /// True if no lane is set.
    #[inline]
    fn none(self) -> bool {
        !self.any()
    }
    /// State of lane `i`.
    fn test(self, i: usize) -> bool;
}

impl Mask for bool {
    #[inline]
    fn splat(b: bool) -> bool {
        b
    }
    #[inline]
    fn any(self) -> bool {
        self
    }
    #[inline]
    fn all(self) -> bool {
        self
    }
    #[inline]
    fn test(self, _i: usize) -> bool {
        self
    }
}

/// Real leaf of a Cayley-Dickson value: a scalar or a SIMD vector of scalars.
pub trait Lane:
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
    /// Element type of the lane.
    type Scalar: BesselFloat;
    /// Mask type produced by comparisons.
    type Mask: Mask;
    /// Number of scalars packed in the lane.
    const WIDTH: usize;

    /// Broadcast a scalar to every lane.
    fn splat(x: Self::Scalar) -> Self;
    /// Scalar in lane `i`.
    fn lane(self, i: usize) -> Self::Scalar;
    /// Build a lane value from a per-lane generator.
    fn from_fn(f: impl FnMut(usize) -> Self::Scalar) -> Self;

    fn simd_lt(self, rhs: Self) -> Self::Mask;
    fn simd_le(self, rhs: Self) -> Self::Mask;
    fn simd_gt(self, rhs: Self) -> Self::Mask;
    fn simd_ge(self, rhs: Self) -> Self::Mask;
    fn simd_eq(self, rhs: Self) -> Self::Mask;
    fn simd_ne(self, rhs: Self) -> Self::Mask;

    /// Lane-wise `mask ? if_true : if_false`.
    fn select(mask: Self::Mask, if_true: Self, if_false: Self) -> Self;

    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
    fn min(self, rhs: Self) -> Self;
    fn max(self, rhs: Self) -> Self;

    /// Broadcast an f64 constant.
    #[inline]
    fn from_f64(x: f64) -> Self {
        Self::splat(<Self::Scalar as BesselFloat>::from_f64(x))
    }

    /// Apply a scalar function lane by lane.
    #[inline]
    fn map(self, f: impl Fn(Self::Scalar) -> Self::Scalar) -> Self {
        Self::from_fn(|i| f(self.lane(i)))
    }

    /// Apply a binary scalar function lane by lane.
    #[inline]
    fn zip_map(self, rhs: Self, f: impl Fn(Self::Scalar, Self::Scalar) -> Self::Scalar) -> Self {
        Self::from_fn(|i| f(self.lane(i), rhs.lane(i)))
    }

    #[inline]
    fn exp(self) -> Self {
        self.map(Float::exp)
    }
    #[inline]
    fn ln(self) -> Self {
        self.map(Float::ln)
    }
    #[inline]
    fn sin(self) -> Self {
        self.map(Float::sin)
    }
    #[inline]
    fn cos(self) -> Self {
        self.map(Float::cos)
    }
    #[inline]
    fn sinh(self) -> Self {
        self.map(Float::sinh)
    }
    #[inline]
    fn cosh(self) -> Self {
        self.map(Float::cosh)
    }
    #[inline]
    fn atan(self) -> Self {
        self.map(Float::atan)
    }
    #[inline]
    fn atan2(self, x: Self) -> Self {
        self.zip_map(x, Float::atan2)
    }
    #[inline]
    fn floor(self) -> Self {
        self.map(Float::floor)
    }

    #[inline]
    fn is_nan(self) -> Self::Mask {
        self.simd_ne(self)
    }
    #[inline]
    fn is_infinite(self) -> Self::Mask {
        self.abs().simd_eq(Self::splat(<Self::Scalar as Float>::infinity()))
    }
    #[inline]
    fn is_finite(self) -> Self::Mask {
        !(self.is_nan() | self.is_infinite())
    }

    /// Largest lane (NaN lanes are ignored).
    #[inline]
    fn reduce_max(self) -> Self::Scalar {
        let mut m = self.lane(0);
        for i in 1..Self::WIDTH {
            m = m.max(self.lane(i));
        }
        m
    }
}

macro_rules! scalar_lane {
    ($t:ty) => {
        impl Lane for $t {
            type Scalar = $t;
            type Mask = bool;
            const WIDTH: usize = 1;

            #[inline]
            fn splat(x: $t) -> $t {
                x
            }
            #[inline]
            fn lane(self, _i: usize) -> $t {
                self
            }
            #[inline]
            fn from_fn(mut f: impl FnMut(usize) -> $t) -> $t {
                f(0)
            }
            #[inline]
            fn simd_lt(self, rhs: $t) -> bool {
                self < rhs
            }
            #[inline]
            fn simd_le(self, rhs: $t) -> bool {
                self <= rhs
            }
            #[inline]
            fn simd_gt(self, rhs: $t) -> bool {
                self > rhs
            }
            #[inline]
            fn simd_ge(self, rhs: $t) -> bool {
                self >= rhs
            }
            #[inline]
            fn simd_eq(self, rhs: $t) -> bool {
                self == rhs
            }
            #[inline]
            fn simd_ne(self, rhs: $t) -> bool {
                self != rhs
            }
            #[inline]
            fn select(mask: bool, if_true: $t, if_false: $t) -> $t {
                if mask {
                    if_true
                } else {
                    if_false
                }
            }
            #[inline]
            fn abs(self) -> $t {
                Float::abs(self)
            }
            #[inline]
            fn sqrt(self) -> $t {
                Float::sqrt(self)
            }
            #[inline]
            fn min(self, rhs: $t) -> $t {
                Float::min(self, rhs)
            }
            #[inline]
            fn max(self, rhs: $t) -> $t {
                Float::max(self, rhs)
            }
            #[inline]
            fn map(self, f: impl Fn($t) -> $t) -> $t {
                f(self)
            }
            #[inline]
            fn reduce_max(self) -> $t {
                self
            }
        }
    };
}

scalar_lane!(f32);
scalar_lane!(f64);

/// Lane mask of a `wide` vector: all-ones bits for set lanes.
#[derive(Clone, Copy, Debug)]
pub struct WideMask<V>(V);

macro_rules! wide_lane {
    ($v:ident, $t:ty, $n:literal, $bits:ty) => {
        impl BitAnd for WideMask<$v> {
            type Output = Self;
            #[inline]
            fn bitand(self, rhs: Self) -> Self {
                WideMask(self.0 & rhs.0)
            }
        }

        impl BitOr for WideMask<$v> {
            type Output = Self;
            #[inline]
            fn bitor(self, rhs: Self) -> Self {
                WideMask(self.0 | rhs.0)
            }
        }

        impl Not for WideMask<$v> {
            type Output = Self;
            #[inline]
            fn not(self) -> Self {
                WideMask(self.0 ^ $v::splat(<$t>::from_bits(<$bits>::MAX)))
            }
        }

        impl Mask for WideMask<$v> {
            #[inline]
            fn splat(b: bool) -> Self {
                let bits = if b { <$bits>::MAX } else { 0 };
                WideMask($v::splat(<$t>::from_bits(bits)))
            }
            #[inline]
            fn any(self) -> bool {
                self.0.move_mask() != 0
            }
            #[inline]
            fn all(self) -> bool {
                self.0.move_mask() == (1 << $n) - 1
            }
            #[inline]
            fn test(self, i: usize) -> bool {
                (self.0.move_mask() >> i) & 1 == 1
            }
        }

        impl Lane for $v {
            type Scalar = $t;
            type Mask = WideMask<$v>;
            const WIDTH: usize = $n;

            #[inline]
            fn splat(x: $t) -> Self {
                $v::splat(x)
            }
            #[inline]
            fn lane(self, i: usize) -> $t {
                self.to_array()[i]
            }
            #[inline]
            fn from_fn(f: impl FnMut(usize) -> $t) -> Self {
                $v::new(core::array::from_fn(f))
            }
            #[inline]
            fn simd_lt(self, rhs: Self) -> Self::Mask {
                WideMask(self.cmp_lt(rhs))
            }
            #[inline]
            fn simd_le(self, rhs: Self) -> Self::Mask {
                WideMask(self.cmp_le(rhs))
            }
            #[inline]
            fn simd_gt(self, rhs: Self) -> Self::Mask {
                WideMask(self.cmp_gt(rhs))
            }
            #[inline]
            fn simd_ge(self, rhs: Self) -> Self::Mask {
                WideMask(self.cmp_ge(rhs))
            }
            #[inline]
            fn simd_eq(self, rhs: Self) -> Self::Mask {
                WideMask(self.cmp_eq(rhs))
            }
            #[inline]
            fn simd_ne(self, rhs: Self) -> Self::Mask {
                WideMask(self.cmp_ne(rhs))
            }
            #[inline]
            fn select(mask: Self::Mask, if_true: Self, if_false: Self) -> Self {
                mask.0.blend(if_true, if_false)
            }
            #[inline]
            fn abs(self) -> Self {
                $v::abs(self)
            }
            #[inline]
            fn sqrt(self) -> Self {
                $v::sqrt(self)
            }
            // Lane-wise through the scalar routine: NaN handling of the
            // packed min/max differs between instruction sets.
            #[inline]
            fn min(self, rhs: Self) -> Self {
                self.zip_map(rhs, Float::min)
            }
            #[inline]
            fn max(self, rhs: Self) -> Self {
                self.zip_map(rhs, Float::max)
            }
            #[inline]
            fn map(self, f: impl Fn($t) -> $t) -> Self {
                $v::new(self.to_array().map(f))
            }
        }
    };
}

wide_lane!(f32x4, f32, 4, u32);
wide_lane!(f32x8, f32, 8, u32);
wide_lane!(f64x2, f64, 2, u64);
wide_lane!(f64x4, f64, 4, u64);
