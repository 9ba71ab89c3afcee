//! Y Bessel function driver.
//!
//! Y is taken from the Hankel route `Y = -i(H1 - J)` of the cylinder
//! continuation rather than from the ν-derivative form of ZBESY, so integer
//! orders need no limiting correction. Negative orders use
//! `Y_{-μ} = sin(μπ) J_μ + cos(μπ) Y_μ`.

use crate::algo::acon::cylinder;
use crate::algo::edge::{finish, screen, split_order};
use crate::algo::sweep::Sink;
use crate::cayley::Complex;
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;
use crate::types::Family;
use crate::utils::{cispi, combine};

/// Store `Y_{±(ν0+k)}(z)` for the offsets `out` wants.
pub(crate) fn besy<L: Lane, S: Sink<L>>(z: Complex<L>, nu: L::Scalar, out: &mut S) {
    let t = |x: f64| <L::Scalar as BesselFloat>::from_f64(x);
    let sc = screen(z);
    let (nu0, n, neg) = split_order(nu);

    if sc.active.any() {
        if neg && nu0 != t(0.0) {
            let mut j = out.twin();
            cylinder(sc.z, nu0, n, sc.active, &mut [(Family::J, &mut j), (Family::Y, &mut *out)]);
            for k in out.range() {
                let (c, s) = cispi(nu0 + t(k as f64));
                out.put(k, combine(j.get(k), s, out.get(k), c), sc.active);
            }
        } else {
            cylinder(sc.z, nu0, n, sc.active, &mut [(Family::Y, &mut *out)]);
            if neg {
                for k in out.range().filter(|k| k % 2 == 1) {
                    out.put(k, -out.get(k), sc.active);
                }
            }
        }
    }

    let sign = if neg { -t(1.0) } else { t(1.0) };
    finish(Family::Y, &sc, |k| sign * (nu0 + t(k as f64)), out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::sweep::Single;
    use crate::sentinel::is_infinite;

    fn y(nu: f64, z: Complex<f64>) -> Complex<f64> {
        let (_, n, _) = split_order(nu);
        let mut out = Single::new(n);
        besy(z, nu, &mut out);
        out.value()
    }

    fn rel(a: Complex<f64>, re: f64, im: f64) -> f64 {
        let d = Complex::new(a.re() - re, a.im() - im);
        crate::cayley::abs(d) / (re * re + im * im).sqrt()
    }

    #[test]
    fn integer_orders_need_no_correction() {
        assert!(rel(y(1.0, Complex::new(2.0, 0.0)), -0.10703243154093754, 0.0) < 1e-14);
        assert!(rel(y(1.0, Complex::new(0.5, 0.25)), -1.2403713257034619, 0.500349606972807) < 1e-13);
        assert!(rel(y(0.0, Complex::new(3.0, 0.0)), 0.3768500100127904, 0.0) < 1e-14);
        assert!(rel(y(0.0, Complex::new(-3.0, 0.0)), 0.3768500100127904, -0.5201039098038669) < 1e-14);
    }

    #[test]
    fn negative_orders() {
        assert!(rel(y(-1.0, Complex::new(2.0, 0.5)), 0.08262623443675966, -0.28550814908228667) < 1e-13);
        assert!(rel(y(-2.0, Complex::new(1.0, 2.0)), -0.7512454872676916, -0.1239501069691137) < 1e-13);
        assert!(rel(y(-2.3, Complex::new(1.0, 2.0)), -0.5415622101171784, 0.2423196217863388) < 1e-13);
        assert!(rel(y(-1.5, Complex::new(4.0, 0.0)), -0.18528594835426895, 0.0) < 1e-13);
    }

    #[test]
    fn lower_half_plane() {
        assert!(rel(y(2.5, Complex::new(3.0, -4.0)), -4.3655480229086105, -3.9703821925703267) < 1e-13);
        assert!(rel(y(4.5, Complex::new(2.0, -1.0)), 0.5369205686252437, -2.6691519630848055) < 1e-13);
    }

    #[test]
    fn singular_at_origin() {
        assert!(is_infinite(y(0.0, Complex::new(0.0, 0.0))));
        assert!(is_infinite(y(-3.5, Complex::new(-0.0, 0.0))));
    }
}
