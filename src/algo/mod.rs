//! Numerical kernels of the Bessel engine.
//!
//! The routines follow Amos Algorithm 644 (TOMS 644), rewritten to run
//! lane-wise: every regime decision is a mask, every regime runs only when
//! some lane needs it, and the results are blended.
//!
//! Orders are split as ν = ν0 + k with 0 ≤ ν0 < 1. The I and K engines fill
//! a [`sweep::Sink`] with the orders ν0 + k a caller asked for; the family
//! drivers at the crate root apply reflection formulas for negative orders
//! and the values at z = 0.

pub(crate) mod constants;

// kernels
pub(crate) mod asymptotic;
pub(crate) mod gamma;
pub(crate) mod lentz;
pub(crate) mod series;

// right half-plane engines
pub(crate) mod asyi;
pub(crate) mod binu;
pub(crate) mod bknu;
pub(crate) mod mlri;
pub(crate) mod seri;
pub(crate) mod sweep;
pub(crate) mod wrsk;

// whole plane
pub(crate) mod acon;
pub(crate) mod edge;
