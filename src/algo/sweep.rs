//! Output sinks and the rescaled three-term recurrence shared by the
//! I and K engines.
//!
//! A sweep over orders `ν0, ν0+1, ..., ν0+n` visits every order but only
//! the orders the caller asked for are stored: a single-order call stores
//! just the top one, a batch call stores all of them. Every write is
//! masked, so different regimes can fill different lanes of the same sink.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use core::ops::Range;

use num_traits::Float;

use crate::cayley::{Algebra, Complex};
use crate::lane::{Lane, Mask};
use crate::machine::BesselFloat;
use crate::sentinel::complex_infinity;

/// Destination of a sweep, indexed by order offset `k` (order `ν0 + k`).
pub(crate) trait Sink<L: Lane> {
    /// Offset of the first stored order.
    fn base(&self) -> usize;
    fn slots(&self) -> &[Complex<L>];
    fn slots_mut(&mut self) -> &mut [Complex<L>];
    /// Zero-filled sink with the same stored range, for intermediate families.
    fn twin(&self) -> Self
    where
        Self: Sized;

    /// Offsets that are stored.
    #[inline]
    fn range(&self) -> Range<usize> {
        self.base()..self.base() + self.slots().len()
    }

    #[inline]
    fn wants(&self, k: usize) -> bool {
        self.range().contains(&k)
    }

    #[inline]
    fn get(&self, k: usize) -> Complex<L> {
        self.slots()[k - self.base()]
    }

    /// Store `v` at `k` in the lanes of `mask`; ignored if `k` is not stored.
    #[inline]
    fn put(&mut self, k: usize, v: Complex<L>, mask: L::Mask) {
        if self.wants(k) {
            let base = self.base();
            let slot = &mut self.slots_mut()[k - base];
            *slot = Complex::blend(mask, v, *slot);
        }
    }

    #[inline]
    fn set(&mut self, k: usize, v: Complex<L>) {
        self.put(k, v, L::Mask::splat(true));
    }

    /// Multiply stored values at offsets `>= k` by `factor` in `mask`.
    fn rescale_from(&mut self, k: usize, factor: L, mask: L::Mask) {
        let start = k.max(self.base());
        for j in start..self.base() + self.slots().len() {
            let v = self.get(j);
            self.put(j, v.scale(factor), mask);
        }
    }
}

/// Sink for a single order.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Single<L: Lane> {
    top: usize,
    value: [Complex<L>; 1],
}

impl<L: Lane> Single<L> {
    pub(crate) fn new(top: usize) -> Self {
        Single {
            top,
            value: [Complex::zero()],
        }
    }

    pub(crate) fn value(&self) -> Complex<L> {
        self.value[0]
    }
}

impl<L: Lane> Sink<L> for Single<L> {
    #[inline]
    fn base(&self) -> usize {
        self.top
    }
    #[inline]
    fn slots(&self) -> &[Complex<L>] {
        &self.value
    }
    #[inline]
    fn slots_mut(&mut self) -> &mut [Complex<L>] {
        &mut self.value
    }
    fn twin(&self) -> Single<L> {
        Single::new(self.top)
    }
}

/// Owned buffer for offsets `0..len`.
#[cfg(feature = "alloc")]
#[derive(Clone, Debug)]
pub(crate) struct Stash<L: Lane>(Vec<Complex<L>>);

#[cfg(feature = "alloc")]
impl<L: Lane> Stash<L> {
    pub(crate) fn new(len: usize) -> Self {
        Stash(alloc::vec![Complex::zero(); len])
    }
}

#[cfg(feature = "alloc")]
impl<L: Lane> Sink<L> for Stash<L> {
    #[inline]
    fn base(&self) -> usize {
        0
    }
    #[inline]
    fn slots(&self) -> &[Complex<L>] {
        &self.0
    }
    #[inline]
    fn slots_mut(&mut self) -> &mut [Complex<L>] {
        &mut self.0
    }
    fn twin(&self) -> Stash<L> {
        Stash::new(self.0.len())
    }
}

/// `p · e^{ln}` without forming a NaN from `0 · ∞`: lanes whose value
/// overflows become complex infinity, lanes that underflow become zero.
#[inline]
pub(crate) fn unscale<L: Lane>(p: Complex<L>, ln: L) -> Complex<L> {
    let m = p.max_abs();
    let zero = m.simd_eq(L::from_f64(0.0));
    let safe = L::select(zero, L::from_f64(1.0), m);
    let e = (ln + safe.ln()).exp();
    let v = p.scale(L::from_f64(1.0) / safe).scale(e);
    let v = Complex::blend(zero, p, v);
    Complex::blend(e.is_infinite() & !zero & !p.any_nan(), complex_infinity(), v)
}

/// Running pair `(prev, cur)` of a three-term recurrence
/// `next = prev + factor · cur`, held as `value = p · e^{log_scale}` with
/// `p` kept near unit size.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ladder<L: Lane> {
    pub(crate) prev: Complex<L>,
    pub(crate) cur: Complex<L>,
    pub(crate) log_scale: L,
}

impl<L: Lane> Ladder<L> {
    pub(crate) fn new(prev: Complex<L>, cur: Complex<L>, log_scale: L) -> Self {
        Ladder { prev, cur, log_scale }
    }

    /// Current value.
    #[inline]
    pub(crate) fn value(&self) -> Complex<L> {
        unscale(self.cur, self.log_scale)
    }

    /// Previous value.
    #[inline]
    pub(crate) fn previous(&self) -> Complex<L> {
        unscale(self.prev, self.log_scale)
    }

    /// Advance one order in the lanes of `mask`.
    pub(crate) fn step(&mut self, factor: Complex<L>, mask: L::Mask) {
        let one = L::from_f64(1.0);
        let limit = L::splat(<L::Scalar as BesselFloat>::MACH_HUGE.sqrt());
        // bring the pair to unit size first if `factor · cur` could overflow
        let size = self.cur.max_abs().max(self.prev.max_abs());
        let tight = mask & (factor.max_abs() * size).simd_gt(limit) & size.simd_gt(L::from_f64(0.0));
        let pre = L::select(tight, one / size, one);
        let (prev, cur) = (self.prev.scale(pre), self.cur.scale(pre));

        let next = prev + factor * cur;
        let m = next.max_abs();
        let big = mask & m.simd_gt(limit);
        let r = L::select(big, one / m, one);
        self.prev = Complex::blend(mask, cur.scale(r), self.prev);
        self.cur = Complex::blend(mask, next.scale(r), self.cur);
        self.log_scale = L::select(tight | big, self.log_scale - pre.ln() - r.ln(), self.log_scale);
    }
}
