//! Cayley-Dickson numbers over scalar and SIMD lanes, with Bessel, Hankel,
//! spherical Bessel and Airy functions of generalized-complex argument.
//!
//! The numerical core follows Amos Algorithm 644 (TOMS 644): power series,
//! Miller's backward recurrence, Wronskian normalization and Hankel
//! asymptotics for I, Temme's method
//! for K, and analytic continuation for J, Y and the Hankel functions. Every
//! routine runs lane-wise, so a `Complex<f64x4>` argument evaluates four
//! independent problems at once and each lane may take its own regime.
//!
//! Arguments of any algebra order are accepted. Real and complex arguments
//! give complex values; quaternions, octonions and sedenions give values of
//! their own type (see [`Argument`]).
//!
//! # Special values
//!
//! Nothing here panics or returns an error for numerical trouble. Results
//! are [`complex_infinity`] at poles and [`failed`] (all NaN) where no value
//! can be produced; test them with [`is_infinite`], [`is_failed`] and
//! [`is_finite`].
//!
//! # Example
//!
//! ```
//! use cayley_bessel::{cyl_bessel_j0, cyl_bessel_k, Complex, Quaternion, Algebra};
//!
//! let w = cyl_bessel_j0(Complex::new(20.0_f64, 1.5));
//! assert!((w.re() - 0.38726191095719636).abs() < 1e-12);
//!
//! // Real arguments give complex values.
//! let k = cyl_bessel_k(1.5, 2.0_f64);
//! assert!((k.re() - 0.17990665795209218).abs() < 1e-14);
//!
//! // Quaternion arguments keep their imaginary direction.
//! let q = Quaternion::<f64>::from_components(&[1.0, 0.0, 2.0, 0.0]);
//! let v = cyl_bessel_j0(q);
//! assert_eq!(v.component(1), 0.0);
//! ```
//!
//! # Features
//!
//! - `std` (default): implies `alloc`.
//! - `alloc`: the batch (`_seq`) entry points.
//!
//! Without `std` the crate is `no_std` and uses the `libm` backend of
//! `num-traits`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod arith;
pub mod cayley;
pub mod extend;
pub mod lane;
pub mod machine;
pub mod promote;
pub mod sentinel;
pub mod types;

pub(crate) mod algo;
mod airy;
mod besh;
mod besi;
mod besj;
mod besk;
mod besy;
mod sph;
pub(crate) mod utils;

/// Lane-wise power series, continued fraction and asymptotic kernels.
///
/// A lane stops iterating once its term falls below tolerance; a lane
/// that reaches the iteration cap comes out [`failed`](crate::failed).
pub mod kernels {
    pub use crate::algo::asymptotic::{asymptotic_series, HankelCoefficients};
    pub use crate::algo::lentz::continued_fraction;
    pub use crate::algo::series::power_series_sum;
}

pub use arith::{add, conj, div, inverse, mul, neg, norm, sub};
pub use cayley::{abs, Algebra, Cayley, Complex, Octonion, Quaternion, Sedenion};
pub use extend::Argument;
pub use lane::{Lane, Mask};
pub use machine::BesselFloat;
pub use promote::{embed, Combine, Join, Lift, Promoted};
pub use sentinel::{canonicalize, complex_infinity, failed, is_equal, is_failed, is_finite, is_infinite, is_nan};
pub use types::{AiryDerivative, Error};

use tracing::debug;

use crate::algo::edge::split_order;
#[cfg(feature = "alloc")]
use crate::algo::sweep::Stash;
use crate::algo::sweep::{Single, Sink};
use crate::extend::{lift, project};
use crate::types::Family;

type ScalarOf<Z> = <<Z as Algebra>::Lane as Lane>::Scalar;

/// The order in the argument's precision, if it is finite and within
/// [`BesselFloat::max_order`].
fn order<T: BesselFloat>(nu: f64) -> Option<T> {
    let v = T::from_f64(nu);
    (v.is_finite() && v.abs() <= T::max_order()).then_some(v)
}

/// Run the driver of `family` on a complex argument.
pub(crate) fn drive<L: Lane, S: Sink<L>>(family: Family, z: Complex<L>, nu: L::Scalar, out: &mut S) {
    match family {
        Family::J => besj::besj(z, nu, out),
        Family::Y => besy::besy(z, nu, out),
        Family::I => besi::besi(z, nu, out),
        Family::K => besk::besk(z, nu, out),
        Family::H1 | Family::H2 => besh::besh(family, z, nu, out),
    }
}

fn single<Z: Argument>(family: Family, nu: f64, z: Z) -> Z::Value {
    let Some(nu) = order::<ScalarOf<Z>>(nu) else {
        debug!(target: "cayley_bessel", nu, "order out of range");
        return failed();
    };
    let (_, n, _) = split_order(nu);
    let mut out = Single::new(n);
    drive(family, project(z), nu, &mut out);
    lift(z, out.value())
}

#[cfg(feature = "alloc")]
fn sequence<Z: Argument>(family: Family, nu: f64, z: Z, buf: &mut [Z::Value]) -> Result<Z::Value, Error> {
    let nu = order::<ScalarOf<Z>>(nu).ok_or(Error::OrderOutOfRange)?;
    let (_, n, _) = split_order(nu);
    if buf.len() <= n {
        return Err(Error::BufferTooSmall {
            needed: n + 1,
            len: buf.len(),
        });
    }
    let mut out = Stash::new(n + 1);
    drive(family, project(z), nu, &mut out);
    for (k, slot) in buf[..=n].iter_mut().enumerate() {
        *slot = lift(z, out.get(k));
    }
    Ok(buf[n])
}

// ── Single order ──

/// Bessel function of the first kind, J_ν(z).
///
/// The branch cut runs along the negative real axis; arguments on the cut
/// take the value from above.
pub fn cyl_bessel_j<Z: Argument>(nu: impl Into<f64>, z: Z) -> Z::Value {
    single(Family::J, nu.into(), z)
}

/// Bessel function of the second kind, Y_ν(z).
pub fn cyl_bessel_y<Z: Argument>(nu: impl Into<f64>, z: Z) -> Z::Value {
    single(Family::Y, nu.into(), z)
}

/// Modified Bessel function of the first kind, I_ν(z).
pub fn cyl_bessel_i<Z: Argument>(nu: impl Into<f64>, z: Z) -> Z::Value {
    single(Family::I, nu.into(), z)
}

/// Modified Bessel function of the second kind, K_ν(z).
pub fn cyl_bessel_k<Z: Argument>(nu: impl Into<f64>, z: Z) -> Z::Value {
    single(Family::K, nu.into(), z)
}

/// Hankel function of the first kind, H^(1)_ν(z) = J_ν(z) + i Y_ν(z).
pub fn cyl_bessel_h1<Z: Argument>(nu: impl Into<f64>, z: Z) -> Z::Value {
    single(Family::H1, nu.into(), z)
}

/// Hankel function of the second kind, H^(2)_ν(z) = J_ν(z) - i Y_ν(z).
pub fn cyl_bessel_h2<Z: Argument>(nu: impl Into<f64>, z: Z) -> Z::Value {
    single(Family::H2, nu.into(), z)
}

// ── Integer orders ──

/// J_0(z).
pub fn cyl_bessel_j0<Z: Argument>(z: Z) -> Z::Value {
    single(Family::J, 0.0, z)
}

/// J_1(z).
pub fn cyl_bessel_j1<Z: Argument>(z: Z) -> Z::Value {
    single(Family::J, 1.0, z)
}

/// J_n(z).
pub fn cyl_bessel_jn<Z: Argument>(n: i32, z: Z) -> Z::Value {
    single(Family::J, f64::from(n), z)
}

/// Y_0(z).
pub fn cyl_bessel_y0<Z: Argument>(z: Z) -> Z::Value {
    single(Family::Y, 0.0, z)
}

/// Y_1(z).
pub fn cyl_bessel_y1<Z: Argument>(z: Z) -> Z::Value {
    single(Family::Y, 1.0, z)
}

/// Y_n(z).
pub fn cyl_bessel_yn<Z: Argument>(n: i32, z: Z) -> Z::Value {
    single(Family::Y, f64::from(n), z)
}

/// I_n(z).
pub fn cyl_bessel_in<Z: Argument>(n: i32, z: Z) -> Z::Value {
    single(Family::I, f64::from(n), z)
}

/// K_n(z).
pub fn cyl_bessel_kn<Z: Argument>(n: i32, z: Z) -> Z::Value {
    single(Family::K, f64::from(n), z)
}

// ── Batch ──

/// Fill `buf[k]` with J of order `sign(ν)(ν0 + k)` for `k = 0..=⌊|ν|⌋`,
/// where `ν0 = |ν| - ⌊|ν|⌋`, from one recurrence sweep.
///
/// Returns the top-order value `buf[⌊|ν|⌋]`. Entries past the filled range
/// are left untouched.
///
/// # Errors
///
/// [`Error::BufferTooSmall`] if `buf` holds fewer than `⌊|ν|⌋ + 1` values,
/// [`Error::OrderOutOfRange`] if ν is not finite or exceeds
/// [`BesselFloat::max_order`].
#[cfg(feature = "alloc")]
pub fn cyl_bessel_j_seq<Z: Argument>(nu: impl Into<f64>, z: Z, buf: &mut [Z::Value]) -> Result<Z::Value, Error> {
    sequence(Family::J, nu.into(), z, buf)
}

/// Batch form of [`cyl_bessel_y`]; see [`cyl_bessel_j_seq`].
#[cfg(feature = "alloc")]
pub fn cyl_bessel_y_seq<Z: Argument>(nu: impl Into<f64>, z: Z, buf: &mut [Z::Value]) -> Result<Z::Value, Error> {
    sequence(Family::Y, nu.into(), z, buf)
}

/// Batch form of [`cyl_bessel_i`]; see [`cyl_bessel_j_seq`].
#[cfg(feature = "alloc")]
pub fn cyl_bessel_i_seq<Z: Argument>(nu: impl Into<f64>, z: Z, buf: &mut [Z::Value]) -> Result<Z::Value, Error> {
    sequence(Family::I, nu.into(), z, buf)
}

/// Batch form of [`cyl_bessel_k`]; see [`cyl_bessel_j_seq`].
#[cfg(feature = "alloc")]
pub fn cyl_bessel_k_seq<Z: Argument>(nu: impl Into<f64>, z: Z, buf: &mut [Z::Value]) -> Result<Z::Value, Error> {
    sequence(Family::K, nu.into(), z, buf)
}

/// Batch form of [`cyl_bessel_h1`]; see [`cyl_bessel_j_seq`].
#[cfg(feature = "alloc")]
pub fn cyl_bessel_h1_seq<Z: Argument>(nu: impl Into<f64>, z: Z, buf: &mut [Z::Value]) -> Result<Z::Value, Error> {
    sequence(Family::H1, nu.into(), z, buf)
}

/// Batch form of [`cyl_bessel_h2`]; see [`cyl_bessel_j_seq`].
#[cfg(feature = "alloc")]
pub fn cyl_bessel_h2_seq<Z: Argument>(nu: impl Into<f64>, z: Z, buf: &mut [Z::Value]) -> Result<Z::Value, Error> {
    sequence(Family::H2, nu.into(), z, buf)
}

/// J_0(z), ..., J_n(z) (or J_0, J_{-1}, ... for negative n) into `buf`.
#[cfg(feature = "alloc")]
pub fn cyl_bessel_jn_seq<Z: Argument>(n: i32, z: Z, buf: &mut [Z::Value]) -> Result<Z::Value, Error> {
    sequence(Family::J, f64::from(n), z, buf)
}

/// Y_0(z), ..., Y_n(z) (or Y_0, Y_{-1}, ... for negative n) into `buf`.
#[cfg(feature = "alloc")]
pub fn cyl_bessel_yn_seq<Z: Argument>(n: i32, z: Z, buf: &mut [Z::Value]) -> Result<Z::Value, Error> {
    sequence(Family::Y, f64::from(n), z, buf)
}

// ── Spherical ──

/// Spherical Bessel function of the first kind, j_n(z) = √(π/2z) J_{n+½}(z).
pub fn sph_bessel_jn<Z: Argument>(n: u32, z: Z) -> Z::Value {
    lift(z, sph::spherical(Family::J, n, project(z)))
}

/// Spherical Bessel function of the second kind, y_n(z) = √(π/2z) Y_{n+½}(z).
pub fn sph_bessel_yn<Z: Argument>(n: u32, z: Z) -> Z::Value {
    lift(z, sph::spherical(Family::Y, n, project(z)))
}

/// Spherical Hankel function of the first kind, h1_n(z) = j_n(z) + i y_n(z).
pub fn sph_bessel_h1n<Z: Argument>(n: u32, z: Z) -> Z::Value {
    lift(z, sph::spherical(Family::H1, n, project(z)))
}

/// Spherical Hankel function of the second kind, h2_n(z) = j_n(z) - i y_n(z).
pub fn sph_bessel_h2n<Z: Argument>(n: u32, z: Z) -> Z::Value {
    lift(z, sph::spherical(Family::H2, n, project(z)))
}

/// Modified spherical Bessel function of the first kind, √(π/2z) I_{n+½}(z).
pub fn sph_bessel_i1n<Z: Argument>(n: u32, z: Z) -> Z::Value {
    lift(z, sph::spherical(Family::I, n, project(z)))
}

/// Modified spherical Bessel function of the second kind, √(π/2z) K_{n+½}(z).
pub fn sph_bessel_kn<Z: Argument>(n: u32, z: Z) -> Z::Value {
    lift(z, sph::spherical(Family::K, n, project(z)))
}

// ── Airy ──

/// Airy function Ai(z), or Ai'(z) with [`AiryDerivative::Derivative`].
pub fn airy_ai<Z: Argument>(z: Z, derivative: AiryDerivative) -> Z::Value {
    lift(z, airy::ai(project(z), derivative))
}

/// Airy function Bi(z), or Bi'(z) with [`AiryDerivative::Derivative`].
pub fn airy_bi<Z: Argument>(z: Z, derivative: AiryDerivative) -> Z::Value {
    lift(z, airy::bi(project(z), derivative))
}

#[cfg(test)]
mod tests {
    use wide::{f32x4, f64x4};

    use super::*;

    fn rel(a: Complex<f64>, b: Complex<f64>) -> f64 {
        abs(a - b) / abs(b)
    }

    #[test]
    fn j0_far_from_the_real_axis() {
        let w = cyl_bessel_j0(Complex::new(20.0_f64, 1.5));
        assert!(rel(w, Complex::new(0.38726191095719636_f64, -0.14785978022800375)) < 1e-12);
    }

    #[test]
    fn real_arguments_are_complex() {
        let k = cyl_bessel_k(1.5, 2.0_f64);
        assert!((k.re() - 0.17990665795209218).abs() < 1e-15);
        assert_eq!(k.im(), 0.0);
        let j = cyl_bessel_j(-0.5, 3.0_f64);
        assert!((j.re() / -0.45604882079463316 - 1.0).abs() < 1e-14);
    }

    #[test]
    fn recurrence_across_regimes() {
        // J_{n-1} + J_{n+1} = (2n/z) J_n for small, mid and large |z|
        let zs = [Complex::new(0.5_f64, 0.3), Complex::new(5.0_f64, 2.0), Complex::new(12.0_f64, -3.0), Complex::new(30.0_f64, 1.0)];
        for z in zs {
            for n in 1..5 {
                let lhs = cyl_bessel_jn(n - 1, z) + cyl_bessel_jn(n + 1, z);
                let rhs = Complex::from_real(f64::from(2 * n)) / z * cyl_bessel_jn(n, z);
                assert!(abs(lhs - rhs) <= 1e-9 * (abs(lhs) + abs(rhs)), "n = {n}, z = {z:?}");
            }
        }
    }

    #[test]
    fn orders_above_the_argument() {
        // RL < |z| < ν²/2, where the Miller sum would cancel
        let cases: [(f64, f64, f64); 4] = [
            (12.5, 60.0, -0.10405450289835081),
            (20.0, 100.0, 0.062217458498338753),
            (40.0, 60.0, -0.077646197404715065),
            (100.0, 1000.0, 0.011676135007802554),
        ];
        for (nu, x, e) in cases {
            let j = cyl_bessel_j(nu, x);
            assert!((j.re() / e - 1.0).abs() < 1e-10, "J_{nu}({x}) = {j:?}");
            assert!(j.im().abs() < 1e-10 * e.abs());
        }
        let y = cyl_bessel_yn(20, 100.0_f64);
        assert!((y.re() / 0.051247973076188424 - 1.0).abs() < 1e-10);
        let i = cyl_bessel_in(40, Complex::new(120.0_f64, 160.0));
        assert!(rel(i, Complex::new(2.6868722571135576e+49_f64, -1.9266925225800136e+49)) < 1e-10);
        let j = cyl_bessel_j(30.5, Complex::new(-45.0_f64, 2.0));
        assert!(rel(j, Complex::new(-0.2115513052661416_f64, 0.21583689939672992)) < 1e-10);
    }

    #[test]
    fn recurrence_between_regimes() {
        for z in [Complex::new(40.0_f64, 0.5), Complex::new(0.0_f64, -35.0)] {
            for n in 14..18 {
                let lhs = cyl_bessel_jn(n - 1, z) + cyl_bessel_jn(n + 1, z);
                let rhs = Complex::from_real(f64::from(2 * n)) / z * cyl_bessel_jn(n, z);
                assert!(abs(lhs - rhs) <= 1e-9 * (abs(lhs) + abs(rhs)), "n = {n}, z = {z:?}");
            }
        }
    }

    #[test]
    fn overflow_from_finite_arguments() {
        assert!(is_infinite(cyl_bessel_yn(5, 1e-100_f64)));
        assert!(is_infinite(cyl_bessel_h1(3, 1e-200_f64)));
        assert!(is_infinite(cyl_bessel_h2(3, Complex::new(1e-200_f64, -1e-201))));
        assert!(is_infinite(cyl_bessel_j(-2.5, 1e-200_f64)));
        assert!(is_infinite(cyl_bessel_in(6, -1000.0_f64)));
        assert!(is_infinite(cyl_bessel_in(6, 1000.0_f64)));
        assert!(is_infinite(cyl_bessel_kn(5, 1e-100_f64)));
        assert!(is_infinite(cyl_bessel_jn(6, Complex::new(0.0_f64, 1000.0))));
        assert!(is_infinite(cyl_bessel_yn(6, Complex::new(0.0_f64, 1000.0))));
        assert!(is_infinite(cyl_bessel_k(0.3, Complex::new(-1000.0_f64, 0.5))));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn batch_matches_single_orders() {
        let z = Complex::new(2.5_f64, -0.5);
        let mut buf = [Complex::zero(); 4];
        let top = cyl_bessel_jn_seq(3, z, &mut buf).unwrap();
        assert_eq!(top, buf[3]);
        let expected = [
            Complex::new(-0.0798950789728725_f64, 0.2552499326756722),
            Complex::new(0.5375683092999967_f64, 0.12849813435317037),
            Complex::new(0.4736402193031514_f64, -0.07370239712708013),
            Complex::new(0.21378661182087633_f64, -0.09615098553232398),
        ];
        for (k, e) in expected.iter().enumerate() {
            assert!(rel(buf[k], *e) < 1e-14);
            assert!(rel(buf[k], cyl_bessel_jn(k as i32, z)) < 1e-14);
        }
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn batch_of_fractional_orders() {
        let z = Complex::new(2.0_f64, -1.0);
        let mut buf = [Complex::zero(); 6];
        cyl_bessel_y_seq(4.5, z, &mut buf).unwrap();
        let expected = [
            Complex::new(-0.38766057535928067_f64, -0.5235683922047661),
            Complex::new(-0.6155232892404671_f64, -0.38466807719204016),
            Complex::new(-0.4587179259296132_f64, -0.8612910514197812),
            Complex::new(0.5369205686252437_f64, -2.6691519630848055),
        ];
        // buf[k] holds order 0.5 + k
        for (k, e) in expected.iter().enumerate() {
            assert!(rel(buf[k + 1], *e) < 1e-13);
        }
        assert_eq!(buf[5], Complex::zero());
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn batch_errors() {
        let z = Complex::new(1.0_f64, 1.0);
        let mut buf = [Complex::zero(); 3];
        assert_eq!(cyl_bessel_jn_seq(3, z, &mut buf), Err(Error::BufferTooSmall { needed: 4, len: 3 }));
        assert_eq!(cyl_bessel_k_seq(f64::NAN, z, &mut buf), Err(Error::OrderOutOfRange));
        assert_eq!(cyl_bessel_i_seq(-2.0e5, z, &mut buf), Err(Error::OrderOutOfRange));
        assert!(buf.iter().all(|v| *v == Complex::zero()));
    }

    #[test]
    fn sentinels() {
        assert!(is_infinite(cyl_bessel_y0(0.0_f64)));
        assert!(is_infinite(cyl_bessel_kn(2, Complex::new(0.0_f64, 0.0))));
        assert_eq!(cyl_bessel_j0(0.0_f64), Complex::new(1.0_f64, 0.0));
        assert_eq!(cyl_bessel_in(3, 0.0_f64), Complex::new(0.0_f64, 0.0));
        assert!(is_failed(cyl_bessel_j(2.0e5, Complex::new(1.0_f64, 0.0))));
        assert!(is_failed(cyl_bessel_j(f64::INFINITY, 1.0_f64)));
        assert!(is_failed(cyl_bessel_h1(0.5, Complex::new(f64::NAN, 1.0))));
        assert!(is_failed(cyl_bessel_i(0.5, failed::<Quaternion<f64>>())));
    }

    #[test]
    fn wide_lanes_match_scalar_calls() {
        let re = [0.3, -4.0, 18.0, 2.0];
        let im = [0.1, 1.0, -2.0, 0.0];
        let z = Complex::new(f64x4::new(re), f64x4::new(im));
        let y = cyl_bessel_y(0.3, z);
        let h = cyl_bessel_h2(-1.7, z);
        for i in 0..4 {
            let zi = Complex::new(re[i], im[i]);
            let (ys, hs) = (cyl_bessel_y(0.3, zi), cyl_bessel_h2(-1.7, zi));
            assert_eq!(y.re().to_array()[i].to_bits(), ys.re().to_bits());
            assert_eq!(y.im().to_array()[i].to_bits(), ys.im().to_bits());
            assert_eq!(h.re().to_array()[i].to_bits(), hs.re().to_bits());
            assert_eq!(h.im().to_array()[i].to_bits(), hs.im().to_bits());
        }

        let zf = Complex::new(f32x4::new([1.0, 5.0, 0.0, 40.0]), f32x4::splat(0.5));
        let kf = cyl_bessel_k(0.25_f32, zf);
        for i in 0..4 {
            let s = cyl_bessel_k(0.25_f32, Complex::new(zf.re().to_array()[i], 0.5_f32));
            assert_eq!(kf.re().to_array()[i].to_bits(), s.re().to_bits());
        }
    }

    #[test]
    fn single_precision() {
        let w = cyl_bessel_j0(Complex::new(20.0_f32, 1.5));
        let e = Complex::new(0.38726191095719636_f64, -0.14785978022800375);
        let w = Complex::new(f64::from(w.re()), f64::from(w.im()));
        assert!(rel(w, e) < 1e-5);
    }

    #[test]
    fn quaternion_argument_follows_its_direction() {
        let q = Quaternion::<f64>::from_components(&[1.0, 0.0, 2.0, 0.0]);
        let v = cyl_bessel_j0(q);
        let w = cyl_bessel_j0(Complex::new(1.0_f64, 2.0));
        assert!((v.component(0) - w.re()).abs() < 1e-15);
        assert!((v.component(2) - w.im()).abs() < 1e-15);
        assert_eq!(v.component(1), 0.0);
        assert_eq!(v.component(3), 0.0);
    }

    #[test]
    fn hankel_identity_for_octonions() {
        let o = Octonion::<f64>::from_components(&[1.5, 0.5, 0.0, -1.0, 0.0, 0.25, 0.0, 2.0]);
        let (h1, h2, j) = (cyl_bessel_h1(0.6, o), cyl_bessel_h2(0.6, o), cyl_bessel_j(0.6, o));
        let d = h1 + h2 - (j + j);
        assert!(d.max_abs() < 1e-13 * j.max_abs());
        assert!(is_finite(h1));
    }

    #[test]
    fn supplements_accept_every_argument_type() {
        let v = sph_bessel_kn(0, 2.0_f64);
        assert!((v.re() - 0.10629208289690908).abs() < 1e-15);
        let a = airy_ai(Quaternion::<f64>::from_components(&[1.0, 1.0, 0.0, 0.0]), AiryDerivative::Value);
        assert!((a.component(0) - 0.060458308371838146).abs() < 1e-14);
        assert!((a.component(1) + 0.15188956587718141).abs() < 1e-14);
    }
}
