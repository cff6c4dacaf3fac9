//! Sample precision abstraction.
//!
//! The engine and its smoothers are generic over [`Sample`], implemented for
//! `f32` and `f64`. Each precision also names a lock-free cell type so a
//! control thread can publish a new value that the audio thread reads once
//! per sample without locking.
//!
//! Math goes through `libm` so the trait works without `std`.

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub};
use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// A floating-point sample type the DSP core can be instantiated with.
///
/// # Example
///
/// ```rust
/// use grit_core::Sample;
///
/// fn unity<T: Sample>() -> T {
///     T::ZERO.db_to_gain()
/// }
///
/// assert_eq!(unity::<f32>(), 1.0);
/// assert_eq!(unity::<f64>(), 1.0);
/// ```
pub trait Sample:
    Copy
    + Default
    + Debug
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
{
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;

    /// Bit storage used by [`AtomicSample`].
    type Bits: Send + Sync;

    /// Convert from `f64`, rounding to the nearest representable value.
    fn from_f64(value: f64) -> Self;

    /// Widen to `f64`.
    fn to_f64(self) -> f64;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Convert a level in decibels to linear gain: `10^(dB / 20)`.
    fn db_to_gain(self) -> Self;

    /// Convert linear gain to decibels: `20 * log10(gain)`.
    ///
    /// Gains at or below zero map to negative infinity.
    fn gain_to_db(self) -> Self;

    #[doc(hidden)]
    fn new_bits(value: Self) -> Self::Bits;
    #[doc(hidden)]
    fn load_bits(bits: &Self::Bits) -> Self;
    #[doc(hidden)]
    fn store_bits(bits: &Self::Bits, value: Self);
}

impl Sample for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    type Bits = AtomicU32;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn abs(self) -> Self {
        libm::fabsf(self)
    }

    #[inline]
    fn db_to_gain(self) -> Self {
        libm::powf(10.0, self / 20.0)
    }

    #[inline]
    fn gain_to_db(self) -> Self {
        if self <= 0.0 {
            f32::NEG_INFINITY
        } else {
            20.0 * libm::log10f(self)
        }
    }

    fn new_bits(value: Self) -> Self::Bits {
        AtomicU32::new(value.to_bits())
    }

    #[inline]
    fn load_bits(bits: &Self::Bits) -> Self {
        f32::from_bits(bits.load(Ordering::Relaxed))
    }

    #[inline]
    fn store_bits(bits: &Self::Bits, value: Self) {
        bits.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl Sample for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    type Bits = AtomicU64;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn abs(self) -> Self {
        libm::fabs(self)
    }

    #[inline]
    fn db_to_gain(self) -> Self {
        libm::pow(10.0, self / 20.0)
    }

    #[inline]
    fn gain_to_db(self) -> Self {
        if self <= 0.0 {
            f64::NEG_INFINITY
        } else {
            20.0 * libm::log10(self)
        }
    }

    fn new_bits(value: Self) -> Self::Bits {
        AtomicU64::new(value.to_bits())
    }

    #[inline]
    fn load_bits(bits: &Self::Bits) -> Self {
        f64::from_bits(bits.load(Ordering::Relaxed))
    }

    #[inline]
    fn store_bits(bits: &Self::Bits, value: Self) {
        bits.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// A sample value that can be written from one thread and read from another.
///
/// Stores the value's bit pattern in an atomic integer with `Relaxed`
/// ordering. Only the latest value matters, so no queue or fence is needed.
pub struct AtomicSample<T: Sample> {
    bits: T::Bits,
}

impl<T: Sample> AtomicSample<T> {
    /// Create a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            bits: T::new_bits(value),
        }
    }

    /// Read the latest published value.
    #[inline]
    pub fn load(&self) -> T {
        T::load_bits(&self.bits)
    }

    /// Publish a new value.
    #[inline]
    pub fn store(&self, value: T) {
        T::store_bits(&self.bits, value);
    }
}

impl<T: Sample> Default for AtomicSample<T> {
    fn default() -> Self {
        Self::new(T::ZERO)
    }
}

impl<T: Sample> core::fmt::Debug for AtomicSample<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("AtomicSample").field(&self.load()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_to_gain_matches_formula() {
        assert_eq!(0.0f32.db_to_gain(), 1.0);
        assert_eq!(0.0f64.db_to_gain(), 1.0);
        assert!((20.0f32.db_to_gain() - 10.0).abs() < 1e-5);
        assert!(((-6.0206f64).db_to_gain() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn gain_to_db_inverts() {
        let db = 0.25f64.gain_to_db();
        assert!((db.db_to_gain() - 0.25).abs() < 1e-12);
        assert_eq!(0.0f32.gain_to_db(), f32::NEG_INFINITY);
    }

    #[test]
    fn atomic_sample_stores_exact_bits() {
        let cell = AtomicSample::new(0.1f32);
        assert_eq!(cell.load(), 0.1f32);
        cell.store(-3.75);
        assert_eq!(cell.load(), -3.75);

        let wide = AtomicSample::new(core::f64::consts::PI);
        assert_eq!(wide.load(), core::f64::consts::PI);
    }

    #[test]
    fn abs_is_sign_agnostic() {
        assert_eq!((-2.5f32).abs(), 2.5);
        assert_eq!(Sample::abs(-2.5f64), 2.5);
    }
}
