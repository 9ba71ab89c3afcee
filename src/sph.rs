//! Spherical Bessel functions.
//!
//! `f_n(z) = √(π/2z) F_{n+½}(z)` for every cylinder family F. The factor
//! `√(1/z)` and the branch `z^{n+½}` of F share the principal branch, so
//! j_n and i_n come out entire.

use crate::algo::constants::RTHPI;
use crate::algo::edge::screen;
use crate::algo::sweep::Single;
use crate::cayley::{Algebra, Complex};
use crate::lane::Lane;
use crate::machine::BesselFloat;
use crate::sentinel::{canonicalize, complex_infinity, failed};
use crate::types::Family;
use crate::utils::zsqrt;

/// `√(π/2z) F_{n+½}(z)`.
pub(crate) fn spherical<L: Lane>(family: Family, n: u32, z: Complex<L>) -> Complex<L> {
    let nu = <L::Scalar as BesselFloat>::from_f64(f64::from(n) + 0.5);
    if nu > <L::Scalar as BesselFloat>::max_order() {
        return failed();
    }
    let sc = screen(z);
    let mut out = Single::new(n as usize);
    crate::drive(family, sc.z, nu, &mut out);
    let v = Complex::from_real(L::from_f64(RTHPI)) / zsqrt(sc.z) * out.value();

    let origin = match (family.is_regular(), n) {
        (true, 0) => Complex::from_real(L::from_f64(1.0)),
        (true, _) => Complex::zero(),
        (false, _) => complex_infinity(),
    };
    let v = Complex::blend(sc.zero, origin, v);
    canonicalize(Complex::blend(sc.bad, failed(), v))
}
