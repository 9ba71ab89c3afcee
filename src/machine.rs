//! Machine constants, tunables and the `BesselFloat` trait.
//!
//! Constants follow the I1MACH/D1MACH conventions of TOMS 644; the derived
//! thresholds (`tol`, `rl`, `elim`, `alim`) keep their Amos meaning.

use num_traits::Float;

/// Scalar floating-point trait underlying every lane type.
///
/// Implemented for `f64` and `f32`. Provides machine constants, derived
/// thresholds of the regime selector, and the iteration caps of the
/// series / continued-fraction / asymptotic kernels.
pub trait BesselFloat: Float + core::fmt::Debug + Send + Sync + 'static {
    /// Machine epsilon (D1MACH(3)).
    const MACH_EPSILON: Self;
    /// Smallest positive normal number (D1MACH(1)).
    const MACH_TINY: Self;
    /// Largest representable number (D1MACH(2)).
    const MACH_HUGE: Self;
    /// Number of binary digits in the mantissa (I1MACH(14)).
    const MACH_DIGITS: i32;

    /// Infallible conversion from f64.
    ///
    /// For f64 this is the identity; for f32 it rounds via `as f32`.
    fn from_f64(x: f64) -> Self;

    /// Tolerance: max(MACH_EPSILON, 1e-18).
    fn tol() -> Self;
    /// Asymptotic region boundary: 1.2*DIG + 3, where DIG = log10(2) * (DIGITS - 1).
    fn rl() -> Self;
    /// Underflow elimination threshold: 2.303*(K*R1M5 - 3), K = min(|MIN_EXP|, MAX_EXP).
    fn elim() -> Self;
    /// Overflow elimination threshold: ELIM + max(-2.303*R1M5*(DIGITS-1), -41.45).
    fn alim() -> Self;

    /// Threshold on |sin(dπ)| below which K_d near integer order switches
    /// from the connection formula `π/2·(I_{-d} - I_d)/sin(dπ)` to Temme's
    /// limiting-form series.
    fn branch_tol() -> Self {
        Self::from_f64(0.3)
    }
    /// Maximum number of terms summed by a power series.
    fn series_cap() -> usize {
        1000
    }
    /// Maximum depth of a continued fraction.
    fn fraction_cap() -> usize {
        1000
    }
    /// Maximum number of terms of an asymptotic expansion.
    fn asymptotic_cap() -> usize {
        80
    }
    /// Largest |ν| accepted by the Bessel entry points.
    fn max_order() -> Self {
        Self::from_f64(1.0e5)
    }

    /// Largest start index of a Miller sweep. Lanes needing more fall back
    /// to the power series.
    fn miller_cap() -> usize {
        200_000
    }

    /// Start value of Miller sweeps (D1MACH(1)/tol), leaving headroom
    /// for the growth of the backward recurrence.
    fn miller_start() -> Self {
        Self::MACH_TINY / Self::tol()
    }
    /// Magnitude above which a Miller sweep rescales its running values.
    fn rescale_bound() -> Self {
        Self::MACH_HUGE * Self::tol()
    }
}

impl BesselFloat for f64 {
    const MACH_EPSILON: f64 = 2.220446049250313e-16;
    const MACH_TINY: f64 = 2.2250738585072014e-308;
    const MACH_HUGE: f64 = 1.7976931348623157e+308;
    const MACH_DIGITS: i32 = 53;

    #[inline]
    fn from_f64(x: f64) -> f64 {
        x
    }
    #[inline]
    fn tol() -> f64 {
        2.220446049250313e-16
    } // max(EPSILON, 1e-18)
    #[inline]
    fn rl() -> f64 {
        21.784271729432426
    } // 1.2*DIG + 3
    #[inline]
    fn elim() -> f64 {
        700.9217936944459
    } // 2.303*(K*R1M5 - 3)
    #[inline]
    fn alim() -> f64 {
        664.8716455337102
    } // ELIM + max(-2.303*R1M5*(DIGITS-1), -41.45)
}

// Derived constants are written at full f64 precision to document the exact
// formula results; the compiler rounds to f32 at compile time.
#[allow(clippy::excessive_precision)]
impl BesselFloat for f32 {
    const MACH_EPSILON: f32 = 1.1920929e-7;
    const MACH_TINY: f32 = 1.1754944e-38;
    const MACH_HUGE: f32 = 3.4028235e+38;
    const MACH_DIGITS: i32 = 24;

    #[inline]
    fn from_f64(x: f64) -> f32 {
        x as f32
    }
    #[inline]
    fn tol() -> f32 {
        1.1920929e-7
    }
    #[inline]
    fn rl() -> f32 {
        11.308427880325882
    }
    #[inline]
    fn elim() -> f32 {
        79.75001000176859
    }
    #[inline]
    fn alim() -> f32 {
        63.80475216144317
    }
    fn max_order() -> f32 {
        1.0e4
    }
}
