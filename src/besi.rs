//! I Bessel function driver.
//!
//! Adapted from ZBESI in TOMS 644. Negative non-integer orders use
//! `I_{-μ} = I_μ + (2/π) sin(μπ) K_μ`; integer orders are even in ν.

use crate::algo::acon::{modified_i, modified_k};
use crate::algo::constants::PI;
use crate::algo::edge::{finish, screen, split_order};
use crate::algo::sweep::Sink;
use crate::cayley::Complex;
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;
use crate::types::Family;
use crate::utils::{combine, sinpi};

/// Store `I_{±(ν0+k)}(z)` for the offsets `out` wants.
pub(crate) fn besi<L: Lane, S: Sink<L>>(z: Complex<L>, nu: L::Scalar, out: &mut S) {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let sc = screen(z);
    let (nu0, n, neg) = split_order(nu);

    if sc.active.any() {
        modified_i(sc.z, nu0, n, sc.active, out);
        if neg && nu0 != t(0.0) {
            let mut k_vals = out.twin();
            modified_k(sc.z, nu0, n, sc.active, &mut k_vals);
            for k in out.range() {
                let s = sinpi(nu0 + t(k as f64)) * t(2.0 / PI);
                out.put(k, combine(out.get(k), t(1.0), k_vals.get(k), s), sc.active);
            }
        }
    }

    let sign = if neg { -t(1.0) } else { t(1.0) };
    finish(Family::I, &sc, |k| sign * (nu0 + t(k as f64)), out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::sweep::Single;

    fn i(nu: f64, z: Complex<f64>) -> Complex<f64> {
        let (_, n, _) = split_order(nu);
        let mut out = Single::new(n);
        besi(z, nu, &mut out);
        out.value()
    }

    fn rel(a: Complex<f64>, re: f64, im: f64) -> f64 {
        let d = Complex::new(a.re() - re, a.im() - im);
        crate::cayley::abs(d) / (re * re + im * im).sqrt()
    }

    #[test]
    fn positive_orders() {
        assert!(rel(i(0.3, Complex::new(5.0, 2.0)), -5.956543066259542, 25.202338531849275) < 1e-13);
        assert!(rel(i(2.7, Complex::new(-3.0, 1.0)), 0.7950827868479197, 1.148389866840375) < 1e-13);
        assert!(rel(i(0.0, Complex::new(3.0, 0.0)), 4.8807925858650245, 0.0) < 1e-14);
        assert!(rel(i(40.0, Complex::new(3.0, 0.0)), 1.4316042657120830e-41, 0.0) < 1e-13);
    }

    #[test]
    fn negative_orders() {
        assert!(rel(i(-0.3, Complex::new(1.0, 1.0)), 0.8852903581278758, 0.4096809257549424) < 1e-13);
        assert!(rel(i(-2.5, Complex::new(1.5, -2.0)), -0.6781811653708265, -0.19029751215104979) < 1e-13);
        assert!(rel(i(-4.0, Complex::new(-2.0, 3.0)), -0.05569969567182117, 0.34831144763600175) < 1e-13);
        assert!(rel(i(-2.25, Complex::new(-1.0, -1.0)), -0.038620674658412096, -0.4314053066811826) < 1e-12);
    }

    #[test]
    fn origin() {
        assert_eq!(i(0.0, Complex::new(0.0, 0.0)), Complex::new(1.0, 0.0));
        assert_eq!(i(-2.0, Complex::new(0.0, 0.0)), Complex::new(0.0, 0.0));
        assert!(crate::sentinel::is_infinite(i(-1.5, Complex::new(0.0, 0.0))));
    }
}
