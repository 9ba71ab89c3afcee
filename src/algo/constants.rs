//! Shared Fortran DATA constants used by multiple algorithm modules.
//!
//! Module-specific constants remain in their respective files.

#![allow(clippy::excessive_precision)]
#![allow(clippy::approx_constant)]

/// π (Fortran: DPI, GPI, PI)
pub(crate) const PI: f64 = 3.14159265358979324e+00;

/// π/2 (Fortran: HPI)
pub(crate) const HPI: f64 = 1.57079632679489662e+00;

/// log₁₀(2) = D1MACH(5) for binary IEEE 754 (Fortran: R1M5)
pub(crate) const R1M5: f64 = 0.30102999566398120;

/// 2/3 (Fortran: TTH)
pub(crate) const TTH: f64 = 6.66666666666666667e-01;

/// √(π/2) (Fortran: RTHPI in ZBKNU)
pub(crate) const RTHPI: f64 = 1.25331413731550025e+00;

/// 6/π (Fortran: SPI in ZBKNU)
pub(crate) const SPI: f64 = 1.90985931710274403e+00;

/// Start-index constant of the Miller K sweep (Fortran: FPI in ZBKNU)
pub(crate) const FPI: f64 = 1.89769999331517738e+00;

/// 1/(π√3) (Fortran: COEF in ZAIRY)
pub(crate) const AIRY_COEF: f64 = 1.83776298473930683e-01;

/// Ai(0) (Fortran: C1 in ZAIRY)
pub(crate) const AIRY_C1: f64 = 3.55028053887817239e-01;

/// -Ai'(0) (Fortran: C2 in ZAIRY)
pub(crate) const AIRY_C2: f64 = 2.58819403792806798e-01;
