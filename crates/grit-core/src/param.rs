//! Linear parameter smoothing for click-free control changes.
//!
//! Audio parameters (drive, mix, output trim, threshold) need smooth
//! transitions to avoid audible clicks when a control moves while audio is
//! playing. [`SmoothedValue`] turns each new target into a linear ramp over a
//! fixed duration and yields one interpolated value per sample.
//!
//! ## Usage
//!
//! ```rust
//! use grit_core::SmoothedValue;
//!
//! let mut gain = SmoothedValue::<f32>::new(0.0);
//! gain.reset(48000.0, 0.02); // 20 ms ramp = 960 samples
//!
//! gain.set_target_value(1.0);
//!
//! let mut last = 0.0;
//! for _ in 0..960 {
//!     last = gain.get_next_value();
//! }
//! assert_eq!(last, 1.0);
//! ```

use crate::Sample;

/// A value that ramps linearly toward its target, one step per sample.
///
/// The ramp length is fixed by [`reset`](Self::reset) and applies to every
/// subsequent target change. Each tick is interpolated from the ramp's start
/// in `f64`, so the value never overshoots the target and small changes
/// still move on every tick at `f32` precision. The final step of a ramp lands
/// exactly on the target.
#[derive(Debug, Clone)]
pub struct SmoothedValue<T: Sample> {
    /// Value returned by the most recent tick
    current: T,
    /// Value the active ramp started from
    start: T,
    /// Value the ramp is heading to
    target: T,
    /// Ticks taken in the active ramp
    elapsed: u32,
    /// Length of the active ramp, zero at rest
    active_steps: u32,
    /// Ramp length for the next target change
    steps_to_target: u32,
}

impl<T: Sample> SmoothedValue<T> {
    /// Create a smoother resting at `initial`.
    ///
    /// The ramp length is zero until [`reset`](Self::reset) is called, so
    /// target changes jump immediately.
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            start: initial,
            target: initial,
            elapsed: 0,
            active_steps: 0,
            steps_to_target: 0,
        }
    }

    /// Bind the ramp duration for a sample rate.
    ///
    /// The ramp length becomes `ceil(ramp_seconds * sample_rate)` samples.
    /// Does nothing if `sample_rate <= 0`. The current value is left where it
    /// is; only the *next* target change uses the new ramp length.
    pub fn reset(&mut self, sample_rate: f64, ramp_seconds: f64) {
        if sample_rate <= 0.0 {
            return;
        }

        let steps = libm::ceil(ramp_seconds.max(0.0) * sample_rate);
        self.steps_to_target = if steps >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            steps as u32
        };
    }

    /// Set a new target value.
    ///
    /// Subsequent [`get_next_value`](Self::get_next_value) calls interpolate
    /// from the current value to `target`. Setting the pending target again
    /// keeps the ramp's progress; setting a different one mid-ramp restarts
    /// from wherever the ramp currently is.
    #[inline]
    pub fn set_target_value(&mut self, target: T) {
        if target == self.target {
            return;
        }

        if self.steps_to_target == 0 {
            self.set_current_and_target_value(target);
            return;
        }

        self.start = self.current;
        self.target = target;
        self.elapsed = 0;
        self.active_steps = self.steps_to_target;
    }

    /// Jump to `value` immediately, cancelling any ramp.
    pub fn set_current_and_target_value(&mut self, value: T) {
        self.current = value;
        self.start = value;
        self.target = value;
        self.elapsed = 0;
        self.active_steps = 0;
    }

    /// Advance one sample and return the new current value.
    ///
    /// Once the target is reached this keeps returning it unchanged.
    #[inline]
    pub fn get_next_value(&mut self) -> T {
        if self.active_steps == 0 {
            return self.target;
        }
        self.advance(1)
    }

    /// Advance `num_samples` ticks at once and return the resulting value.
    pub fn skip(&mut self, num_samples: u32) -> T {
        if self.active_steps == 0 {
            return self.target;
        }
        self.advance(num_samples)
    }

    fn advance(&mut self, ticks: u32) -> T {
        if ticks >= self.active_steps - self.elapsed {
            self.set_current_and_target_value(self.target);
            return self.target;
        }

        self.elapsed += ticks;
        let start = self.start.to_f64();
        let span = self.target.to_f64() - start;
        let fraction = f64::from(self.elapsed) / f64::from(self.active_steps);
        let value = T::from_f64(start + span * fraction);

        // Rounding into T must not carry the value past the target.
        let overshot = if span > 0.0 {
            value > self.target
        } else {
            value < self.target
        };
        self.current = if overshot { self.target } else { value };
        self.current
    }

    /// Value returned by the most recent tick, without advancing.
    #[inline]
    pub fn current_value(&self) -> T {
        self.current
    }

    /// Value the smoother is heading to.
    #[inline]
    pub fn target_value(&self) -> T {
        self.target
    }

    /// `true` while a ramp is in progress.
    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.active_steps > 0
    }

    /// Ramp length in samples applied to the next target change.
    #[inline]
    pub fn ramp_length_in_samples(&self) -> u32 {
        self.steps_to_target
    }
}

impl<T: Sample> Default for SmoothedValue<T> {
    fn default() -> Self {
        Self::new(T::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(initial: f32) -> SmoothedValue<f32> {
        let mut value = SmoothedValue::new(initial);
        value.reset(48000.0, 0.01);
        value
    }

    #[test]
    fn jumps_when_ramp_not_configured() {
        let mut value = SmoothedValue::<f32>::new(1.0);
        value.set_target_value(0.5);
        assert_eq!(value.current_value(), 0.5);
        assert_eq!(value.get_next_value(), 0.5);
    }

    #[test]
    fn ramp_length_rounds_up() {
        let mut value = SmoothedValue::<f64>::new(0.0);
        value.reset(44100.0, 0.0101);
        // 445.41 samples
        assert_eq!(value.ramp_length_in_samples(), 446);
    }

    #[test]
    fn reaches_target_exactly() {
        let mut value = configured(0.0);
        value.set_target_value(1.0);

        for _ in 0..479 {
            let v = value.get_next_value();
            assert!(v > 0.0 && v < 1.0, "Intermediate value out of range: {v}");
        }
        assert_eq!(value.get_next_value(), 1.0);
        assert!(!value.is_smoothing());
    }

    #[test]
    fn constant_rate() {
        let mut value = configured(0.0);
        value.set_target_value(1.0);

        for _ in 0..240 {
            value.get_next_value();
        }

        assert!(
            (value.current_value() - 0.5).abs() < 1e-4,
            "Should be halfway, got {}",
            value.current_value()
        );
    }

    #[test]
    fn idempotent_at_rest() {
        let mut value = configured(0.25);
        for _ in 0..10 {
            assert_eq!(value.get_next_value(), 0.25);
        }
    }

    #[test]
    fn retarget_mid_ramp_starts_from_current() {
        let mut value = configured(0.0);
        value.set_target_value(1.0);
        for _ in 0..240 {
            value.get_next_value();
        }
        let midpoint = value.current_value();

        value.set_target_value(0.0);
        let next = value.get_next_value();
        assert!(next < midpoint, "Should head down from {midpoint}, got {next}");
        assert!(midpoint - next < 0.01, "Should not jump, got {next}");
    }

    #[test]
    fn same_target_keeps_progress() {
        let mut value = configured(0.0);
        value.set_target_value(1.0);
        for _ in 0..100 {
            value.get_next_value();
        }
        let before = value.current_value();
        value.set_target_value(1.0);
        let after = value.get_next_value();
        assert!((after - before - 1.0 / 480.0).abs() < 1e-6);
    }

    #[test]
    fn reset_keeps_current_value() {
        let mut value = configured(0.75);
        value.reset(96000.0, 0.02);
        assert_eq!(value.current_value(), 0.75);
        assert_eq!(value.ramp_length_in_samples(), 1920);
    }

    #[test]
    fn reset_ignores_invalid_sample_rate() {
        let mut value = configured(0.0);
        value.reset(0.0, 0.02);
        assert_eq!(value.ramp_length_in_samples(), 480);
        value.reset(-44100.0, 0.02);
        assert_eq!(value.ramp_length_in_samples(), 480);
    }

    #[test]
    fn skip_matches_ticking() {
        let mut ticked = configured(-1.0);
        let mut skipped = configured(-1.0);
        ticked.set_target_value(1.0);
        skipped.set_target_value(1.0);

        for _ in 0..100 {
            ticked.get_next_value();
        }
        let jumped = skipped.skip(100);
        assert!((ticked.current_value() - jumped).abs() < 1e-4);

        assert_eq!(skipped.skip(10_000), 1.0);
        assert!(!skipped.is_smoothing());
    }

    #[test]
    fn long_f32_ramp_never_passes_target() {
        let mut value = SmoothedValue::<f32>::new(16.08);
        value.reset(96000.0, 0.02);
        value.set_target_value(16.13);

        let mut previous = 16.08;
        for _ in 1..1920 {
            let v = value.get_next_value();
            assert!(v < 16.13, "Overshot target: {v}");
            assert!(v >= previous, "Not monotonic: {previous} then {v}");
            previous = v;
        }
        assert_eq!(value.get_next_value(), 16.13);
    }

    #[test]
    fn tiny_f32_change_moves_during_ramp() {
        let mut value = SmoothedValue::<f32>::new(0.5);
        value.reset(48000.0, 0.02);
        value.set_target_value(0.500_01);

        let ticks: Vec<f32> = (0..960).map(|_| value.get_next_value()).collect();
        let midpoint = ticks[479];
        assert!(
            midpoint > 0.5 && midpoint < 0.500_01,
            "Ramp stalled at {midpoint}"
        );
        let mut distinct = ticks.clone();
        distinct.dedup();
        assert!(distinct.len() > 10, "Only {} distinct values", distinct.len());
        assert_eq!(ticks[959], 0.500_01);
    }

    #[test]
    fn set_current_and_target_cancels_ramp() {
        let mut value = configured(0.0);
        value.set_target_value(1.0);
        value.get_next_value();
        value.set_current_and_target_value(-0.5);
        assert!(!value.is_smoothing());
        assert_eq!(value.get_next_value(), -0.5);
    }
}
