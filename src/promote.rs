//! Type promotion between algebra orders and lane types.
//!
//! The common type of two operands has the larger order, the wider lane and
//! the wider float precision. Resolution is structural: `Cayley<A> ⊔ Cayley<B>`
//! is `Cayley<A ⊔ B>` and a lane joined with a pair descends into the pair,
//! so the order always ends up as the maximum. Lane pairs without a sensible
//! common type (`f64` with `f32x8`, `f64x2` with `f32x4`) have no impl and
//! fail to compile.

use wide::{f32x4, f32x8, f64x2, f64x4};

use crate::cayley::{Algebra, Cayley};
use crate::lane::Lane;

/// Common type of `Self` and `Rhs`.
pub trait Join<Rhs> {
    type Output: Algebra;
}

/// Lossless conversion of a lane into a wider lane type.
pub trait Lift<Target: Lane>: Lane {
    fn lift(self) -> Target;
}

macro_rules! lift_identity {
    ($($l:ty),*) => {$(
        impl Lift<$l> for $l {
            #[inline]
            fn lift(self) -> $l {
                self
            }
        }
        impl Join<$l> for $l {
            type Output = $l;
        }
    )*};
}

lift_identity!(f32, f64, f32x4, f32x8, f64x2, f64x4);

macro_rules! lift {
    ($from:ty => $to:ty, |$x:ident| $body:expr) => {
        impl Lift<$to> for $from {
            #[inline]
            fn lift(self) -> $to {
                let $x = self;
                $body
            }
        }
    };
}

lift!(f32 => f64, |x| x as f64);
lift!(f32 => f32x4, |x| f32x4::splat(x));
lift!(f32 => f32x8, |x| f32x8::splat(x));
lift!(f32 => f64x2, |x| f64x2::splat(x as f64));
lift!(f32 => f64x4, |x| f64x4::splat(x as f64));
lift!(f64 => f64x2, |x| f64x2::splat(x));
lift!(f64 => f64x4, |x| f64x4::splat(x));
lift!(f32x4 => f64x4, |x| {
    let a = x.to_array();
    f64x4::new([a[0] as f64, a[1] as f64, a[2] as f64, a[3] as f64])
});

macro_rules! join {
    ($($a:ty, $b:ty => $o:ty;)*) => {$(
        impl Join<$b> for $a {
            type Output = $o;
        }
        impl Join<$a> for $b {
            type Output = $o;
        }
    )*};
}

join! {
    f32, f64 => f64;
    f32, f32x4 => f32x4;
    f32, f32x8 => f32x8;
    f32, f64x2 => f64x2;
    f32, f64x4 => f64x4;
    f64, f64x2 => f64x2;
    f64, f64x4 => f64x4;
    f64, f32x4 => f64x4;
    f32x4, f64x4 => f64x4;
}

macro_rules! join_lane_with_pair {
    ($($l:ty),*) => {$(
        impl<A: Algebra> Join<Cayley<A>> for $l
        where
            $l: Join<A>,
        {
            type Output = Cayley<<$l as Join<A>>::Output>;
        }
        impl<A: Algebra> Join<$l> for Cayley<A>
        where
            A: Join<$l>,
        {
            type Output = Cayley<<A as Join<$l>>::Output>;
        }
    )*};
}

join_lane_with_pair!(f32, f64, f32x4, f32x8, f64x2, f64x4);

impl<A: Algebra, B: Algebra> Join<Cayley<B>> for Cayley<A>
where
    A: Join<B>,
{
    type Output = Cayley<<A as Join<B>>::Output>;
}

/// Zero-extend `x` into the (equal or higher order) algebra `Y`, lifting
/// every leaf into `Y`'s lane type.
#[inline]
pub fn embed<X, Y>(x: X) -> Y
where
    X: Algebra,
    Y: Algebra,
    X::Lane: Lift<Y::Lane>,
{
    debug_assert!(X::ORDER <= Y::ORDER);
    let mut y = Y::zero();
    for i in 0..X::ORDER {
        y.set_component(i, x.component(i).lift());
    }
    y
}

/// A pair of operand types with a common type, and the conversions into it.
pub trait Combine<Rhs: Algebra>: Algebra {
    type Out: Algebra;
    fn lift_left(self) -> Self::Out;
    fn lift_right(rhs: Rhs) -> Self::Out;
}

impl<X, Y> Combine<Y> for X
where
    X: Algebra + Join<Y>,
    Y: Algebra,
    X::Lane: Lift<<<X as Join<Y>>::Output as Algebra>::Lane>,
    Y::Lane: Lift<<<X as Join<Y>>::Output as Algebra>::Lane>,
{
    type Out = <X as Join<Y>>::Output;

    #[inline]
    fn lift_left(self) -> Self::Out {
        embed(self)
    }

    #[inline]
    fn lift_right(rhs: Y) -> Self::Out {
        embed(rhs)
    }
}

/// Common type of `X` and `Y`.
pub type Promoted<X, Y> = <X as Combine<Y>>::Out;
