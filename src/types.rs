//! Core types shared by the public entry points and the engine.

use core::fmt;

/// Function family evaluated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Family {
    /// J, Bessel function of the first kind.
    J,
    /// Y, Bessel function of the second kind.
    Y,
    /// I, modified Bessel function of the first kind.
    I,
    /// K, modified Bessel function of the second kind.
    K,
    /// H^(1), Hankel function of the first kind.
    H1,
    /// H^(2), Hankel function of the second kind.
    H2,
}

impl Family {
    /// The function is regular at z = 0 (J and I).
    #[inline]
    pub(crate) fn is_regular(self) -> bool {
        matches!(self, Family::J | Family::I)
    }
}

/// Selects Airy function value or its derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AiryDerivative {
    /// Ai(z) or Bi(z).
    #[default]
    Value,
    /// Ai'(z) or Bi'(z).
    Derivative,
}

/// Error type of the batch (`_seq`) entry points.
///
/// Per-value numerical trouble never shows up here: it is reported through
/// the `failed` and `complex_infinity` sentinels of the returned values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The output buffer cannot hold every order of the sweep.
    BufferTooSmall {
        /// Number of orders the sweep produces, ⌊|ν|⌋ + 1.
        needed: usize,
        /// Length of the buffer that was passed.
        len: usize,
    },
    /// The order is NaN, infinite, or larger in magnitude than
    /// [`BesselFloat::max_order`](crate::BesselFloat::max_order).
    OrderOutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BufferTooSmall { needed, len } => {
                write!(f, "buffer too small: {needed} orders requested, buffer holds {len}")
            }
            Error::OrderOutOfRange => {
                write!(f, "order out of range: must be finite and within max_order")
            }
        }
    }
}

impl core::error::Error for Error {}
