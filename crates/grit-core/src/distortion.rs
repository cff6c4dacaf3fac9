//! Distortion engine with click-free parameter ramps.
//!
//! Signal flow per sample:
//!
//! ```text
//! input ─┬─ × drive gain ── threshold clamp ──┐
//!        │                                     ├─ dry/wet mix ── × output gain ── out
//!        └──────────────── dry ────────────────┘
//! ```
//!
//! All four controls ramp linearly over [`RAMP_SECONDS`]. Setters only
//! publish a new target into a shared [`DistortionParams`] block; the audio
//! thread picks it up on its next tick, so setters can run on any thread.

#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
use core::fmt;
use core::str::FromStr;
use core::sync::atomic::{AtomicU8, Ordering};
#[cfg(feature = "std")]
use std::sync::Arc;

use crate::{AtomicSample, Effect, ProcessSpec, Sample, SmoothedValue};

/// Ramp duration for every control, in seconds.
pub const RAMP_SECONDS: f64 = 0.02;

/// Drive target assigned by [`Distortion::reset`], in dB.
pub const DEFAULT_DRIVE_DB: f64 = 0.0;

/// Mix target assigned by [`Distortion::reset`]: fully wet.
pub const DEFAULT_MIX: f64 = 1.0;

/// Output trim target assigned by [`Distortion::reset`], in dB.
pub const DEFAULT_OUTPUT_DB: f64 = 0.0;

/// Threshold target assigned by [`Distortion::reset`].
///
/// A threshold of 0 clamps every non-zero wet sample to 0, so a freshly reset
/// engine running fully wet outputs silence until a threshold is set.
pub const DEFAULT_THRESHOLD: f64 = 0.0;

/// Waveshaping model selector.
///
/// Only [`HardClip`](Self::HardClip) has its own transfer function.
/// [`SoftClip`](Self::SoftClip) and [`Saturation`](Self::Saturation) are
/// accepted and stored but currently dispatch to the hard-clip path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum DistortionModel {
    /// Threshold clamp
    #[default]
    HardClip = 0,
    /// Reserved, routes to hard clip
    SoftClip = 1,
    /// Reserved, routes to hard clip
    Saturation = 2,
}

impl DistortionModel {
    /// Every model, in selector order.
    pub const ALL: [Self; 3] = [Self::HardClip, Self::SoftClip, Self::Saturation];

    /// Stable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::HardClip => "hard_clip",
            Self::SoftClip => "soft_clip",
            Self::Saturation => "saturation",
        }
    }

    /// `true` if the model has a transfer function of its own.
    pub const fn is_implemented(self) -> bool {
        matches!(self, Self::HardClip)
    }

    /// Look up a model by selector index.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::HardClip),
            1 => Some(Self::SoftClip),
            2 => Some(Self::Saturation),
            _ => None,
        }
    }
}

impl fmt::Display for DistortionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a model name is not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownModel;

impl fmt::Display for UnknownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown distortion model (expected hard_clip, soft_clip or saturation)")
    }
}

impl core::error::Error for UnknownModel {}

impl FromStr for DistortionModel {
    type Err = UnknownModel;

    /// Accepts the [`name`](Self::name) forms plus the short aliases
    /// `hard`, `soft` and `sat`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        for model in Self::ALL {
            if s.eq_ignore_ascii_case(model.name()) {
                return Ok(model);
            }
        }
        if s.eq_ignore_ascii_case("hard") {
            Ok(Self::HardClip)
        } else if s.eq_ignore_ascii_case("soft") {
            Ok(Self::SoftClip)
        } else if s.eq_ignore_ascii_case("sat") {
            Ok(Self::Saturation)
        } else {
            Err(UnknownModel)
        }
    }
}

/// Control targets shared between a control thread and the audio thread.
///
/// Every field is a single atomic scalar. Writers store the latest value;
/// the engine reads each one once per sample. Obtain a handle with
/// [`Distortion::params`].
///
/// # Example
///
/// ```rust
/// use grit_core::{Distortion, Effect, ProcessSpec};
///
/// let mut engine = Distortion::<f32>::new();
/// engine.prepare(&ProcessSpec::new(48000.0, 256, 2));
///
/// let params = engine.params();
/// std::thread::spawn(move || params.set_drive(12.0)).join().unwrap();
///
/// assert_eq!(engine.params().drive(), 12.0);
/// ```
#[derive(Debug)]
pub struct DistortionParams<T: Sample> {
    drive_db: AtomicSample<T>,
    mix: AtomicSample<T>,
    output_db: AtomicSample<T>,
    threshold: AtomicSample<T>,
    model: AtomicU8,
}

impl<T: Sample> DistortionParams<T> {
    /// Parameter block holding the reset defaults.
    pub fn new() -> Self {
        Self {
            drive_db: AtomicSample::new(T::from_f64(DEFAULT_DRIVE_DB)),
            mix: AtomicSample::new(T::from_f64(DEFAULT_MIX)),
            output_db: AtomicSample::new(T::from_f64(DEFAULT_OUTPUT_DB)),
            threshold: AtomicSample::new(T::from_f64(DEFAULT_THRESHOLD)),
            model: AtomicU8::new(DistortionModel::default() as u8),
        }
    }

    /// Set the drive target in dB.
    #[inline]
    pub fn set_drive(&self, db: T) {
        self.drive_db.store(db);
    }

    /// Set the dry/wet target (0 = dry, 1 = wet).
    #[inline]
    pub fn set_mix(&self, fraction: T) {
        self.mix.store(fraction);
    }

    /// Set the output trim target in dB.
    #[inline]
    pub fn set_output(&self, db: T) {
        self.output_db.store(db);
    }

    /// Set the clipping threshold target (linear amplitude).
    #[inline]
    pub fn set_threshold(&self, threshold: T) {
        self.threshold.store(threshold);
    }

    /// Select the waveshaping model.
    #[inline]
    pub fn set_distortion_model(&self, model: DistortionModel) {
        self.model.store(model as u8, Ordering::Relaxed);
    }

    /// Latest drive target in dB.
    pub fn drive(&self) -> T {
        self.drive_db.load()
    }

    /// Latest mix target.
    pub fn mix(&self) -> T {
        self.mix.load()
    }

    /// Latest output trim target in dB.
    pub fn output(&self) -> T {
        self.output_db.load()
    }

    /// Latest threshold target.
    pub fn threshold(&self) -> T {
        self.threshold.load()
    }

    /// Selected waveshaping model.
    pub fn distortion_model(&self) -> DistortionModel {
        DistortionModel::from_index(self.model.load(Ordering::Relaxed)).unwrap_or_default()
    }

    fn store_defaults(&self) {
        self.set_drive(T::from_f64(DEFAULT_DRIVE_DB));
        self.set_mix(T::from_f64(DEFAULT_MIX));
        self.set_output(T::from_f64(DEFAULT_OUTPUT_DB));
        self.set_threshold(T::from_f64(DEFAULT_THRESHOLD));
    }
}

impl<T: Sample> Default for DistortionParams<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Distortion engine: drive, threshold clip, dry/wet mix and output trim.
///
/// One instance serves every channel of a stream; all channels share the
/// four parameter ramps, which advance once per processed sample.
///
/// # Example
///
/// ```rust
/// use grit_core::{Distortion, Effect, ProcessContext, ProcessSpec};
///
/// let mut dist = Distortion::<f32>::new();
/// dist.prepare(&ProcessSpec::new(48000.0, 64, 1));
/// dist.set_threshold(0.5);
/// dist.set_drive(6.0);
///
/// let input = [0.1f32; 64];
/// let channels = [&input[..]];
/// let mut out = [0.0f32; 64];
/// let mut outputs = [&mut out[..]];
/// dist.process(ProcessContext::new(&channels, &mut outputs));
///
/// assert!(out.iter().all(|s| s.is_finite()));
/// ```
pub struct Distortion<T: Sample> {
    params: Arc<DistortionParams<T>>,

    drive: SmoothedValue<T>,
    mix: SmoothedValue<T>,
    output: SmoothedValue<T>,
    threshold: SmoothedValue<T>,

    sample_rate: f64,
}

impl<T: Sample> Distortion<T> {
    /// Create an unprepared engine resting at the reset defaults.
    ///
    /// Call [`prepare`](Effect::prepare) before processing.
    pub fn new() -> Self {
        Self {
            params: Arc::new(DistortionParams::new()),
            drive: SmoothedValue::new(T::from_f64(DEFAULT_DRIVE_DB)),
            mix: SmoothedValue::new(T::from_f64(DEFAULT_MIX)),
            output: SmoothedValue::new(T::from_f64(DEFAULT_OUTPUT_DB)),
            threshold: SmoothedValue::new(T::from_f64(DEFAULT_THRESHOLD)),
            sample_rate: 0.0,
        }
    }

    /// Shared handle to the control targets, for use on another thread.
    pub fn params(&self) -> Arc<DistortionParams<T>> {
        Arc::clone(&self.params)
    }

    /// Sample rate bound by the last [`prepare`](Effect::prepare), or 0.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Set the drive target in dB.
    #[inline]
    pub fn set_drive(&self, db: T) {
        self.params.set_drive(db);
    }

    /// Set the dry/wet target (0 = dry, 1 = wet).
    #[inline]
    pub fn set_mix(&self, fraction: T) {
        self.params.set_mix(fraction);
    }

    /// Set the output trim target in dB.
    #[inline]
    pub fn set_output(&self, db: T) {
        self.params.set_output(db);
    }

    /// Set the clipping threshold target (linear amplitude).
    #[inline]
    pub fn set_threshold(&self, threshold: T) {
        self.params.set_threshold(threshold);
    }

    /// Select the waveshaping model.
    #[inline]
    pub fn set_distortion_model(&self, model: DistortionModel) {
        self.params.set_distortion_model(model);
    }

    /// Selected waveshaping model.
    pub fn distortion_model(&self) -> DistortionModel {
        self.params.distortion_model()
    }

    /// Hard-clip transfer function.
    ///
    /// Smoothers tick in the order drive, threshold, mix, output, exactly
    /// once each regardless of whether the clamp engages.
    #[inline]
    fn process_hard_clipping(&mut self, input: T) -> T {
        let params = &*self.params;

        let dry = input;
        let mut wet = input * tick(&mut self.drive, &params.drive_db).db_to_gain();

        let threshold = tick(&mut self.threshold, &params.threshold);
        if wet.abs() > threshold {
            // Clamps to +threshold for negative excursions too.
            wet = threshold;
        }

        let mix = tick(&mut self.mix, &params.mix);
        let blended = (T::ONE - mix) * dry + mix * wet;

        blended * tick(&mut self.output, &params.output_db).db_to_gain()
    }
}

/// Pull the latest published target into `smoother`, then advance it.
#[inline]
fn tick<T: Sample>(smoother: &mut SmoothedValue<T>, target: &AtomicSample<T>) -> T {
    smoother.set_target_value(target.load());
    smoother.get_next_value()
}

impl<T: Sample> Default for Distortion<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> Effect<T> for Distortion<T> {
    fn prepare(&mut self, spec: &ProcessSpec) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = spec.sample_rate,
            max_block = spec.maximum_block_size,
            channels = spec.num_channels,
            "distortion prepare"
        );
        self.sample_rate = spec.sample_rate;
        self.reset();
    }

    /// Re-bind every ramp to the current sample rate and assign the default
    /// targets. Does nothing until a positive sample rate is prepared.
    fn reset(&mut self) {
        if self.sample_rate <= 0.0 {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                sample_rate = self.sample_rate,
                "distortion reset skipped: no valid sample rate"
            );
            return;
        }

        self.params.store_defaults();

        for (smoother, default) in [
            (&mut self.drive, DEFAULT_DRIVE_DB),
            (&mut self.mix, DEFAULT_MIX),
            (&mut self.output, DEFAULT_OUTPUT_DB),
            (&mut self.threshold, DEFAULT_THRESHOLD),
        ] {
            smoother.reset(self.sample_rate, RAMP_SECONDS);
            smoother.set_target_value(T::from_f64(default));
        }
    }

    #[inline]
    fn process_sample(&mut self, input: T) -> T {
        match self.params.distortion_model() {
            DistortionModel::HardClip | DistortionModel::SoftClip | DistortionModel::Saturation => {
                self.process_hard_clipping(input)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProcessContext;

    fn prepared() -> Distortion<f32> {
        let mut dist = Distortion::new();
        dist.prepare(&ProcessSpec::new(48000.0, 512, 2));
        dist
    }

    /// Run until every ramp has settled.
    fn settle(dist: &mut Distortion<f32>) {
        for _ in 0..2000 {
            dist.process_sample(0.0);
        }
    }

    #[test]
    fn reset_assigns_defaults() {
        let dist = prepared();
        let params = dist.params();
        assert_eq!(params.drive(), 0.0);
        assert_eq!(params.mix(), 1.0);
        assert_eq!(params.output(), 0.0);
        assert_eq!(params.threshold(), 0.0);
        assert_eq!(dist.drive.ramp_length_in_samples(), 960);
    }

    #[test]
    fn reset_without_sample_rate_is_noop() {
        let mut dist = Distortion::<f64>::new();
        dist.set_drive(12.0);
        dist.reset();
        assert_eq!(dist.params().drive(), 12.0);
        assert_eq!(dist.drive.ramp_length_in_samples(), 0);
    }

    #[test]
    fn default_threshold_silences_wet_path() {
        let mut dist = prepared();
        settle(&mut dist);
        for x in [0.5f32, -0.25, 1.0] {
            assert_eq!(dist.process_sample(x), 0.0);
        }
    }

    #[test]
    fn unity_settings_pass_through() {
        let mut dist = prepared();
        dist.set_threshold(2.0);
        settle(&mut dist);

        for x in [0.0f32, 0.5, -0.75, 1.0, -1.0, 1.5] {
            assert_eq!(dist.process_sample(x), x);
        }
    }

    #[test]
    fn negative_excursion_clamps_to_positive_threshold() {
        let mut dist = prepared();
        dist.set_threshold(0.25);
        settle(&mut dist);

        // wet = -0.5 = -2t, so |wet| > t and wet becomes +t
        assert_eq!(dist.process_sample(-0.5), 0.25);
        assert_eq!(dist.process_sample(0.5), 0.25);
        assert_eq!(dist.process_sample(-0.1), -0.1);
    }

    #[test]
    fn dry_mix_ignores_drive_and_threshold() {
        let mut dist = prepared();
        dist.set_mix(0.0);
        dist.set_drive(24.0);
        dist.set_threshold(0.01);
        dist.set_output(-6.0);
        settle(&mut dist);

        let gain = (-6.0f32).db_to_gain();
        for x in [0.3f32, -0.8] {
            let y = dist.process_sample(x);
            assert!((y - x * gain).abs() < 1e-6, "Expected {}, got {y}", x * gain);
        }
    }

    #[test]
    fn wet_mix_tracks_processed_path() {
        let mut dist = prepared();
        dist.set_drive(20.0);
        dist.set_threshold(0.5);
        settle(&mut dist);

        // 0.01 * 10 = 0.1, below threshold
        assert!((dist.process_sample(0.01) - 0.1).abs() < 1e-6);
        // 0.2 * 10 = 2.0, clamped
        assert_eq!(dist.process_sample(0.2), 0.5);
    }

    #[test]
    fn ramps_instead_of_jumping() {
        let mut dist = prepared();
        dist.set_threshold(2.0);
        settle(&mut dist);

        dist.set_output(-20.0);
        let first = dist.process_sample(1.0);
        assert!(first < 1.0 && first > 0.9, "First sample should barely move, got {first}");

        for _ in 0..958 {
            dist.process_sample(1.0);
        }
        let last = dist.process_sample(1.0);
        assert!((last - 0.1).abs() < 1e-6, "Ramp should land on -20 dB, got {last}");
    }

    #[test]
    fn model_selector_is_stored() {
        let dist = prepared();
        dist.set_distortion_model(DistortionModel::Saturation);
        assert_eq!(dist.distortion_model(), DistortionModel::Saturation);
    }

    #[test]
    fn unimplemented_models_route_to_hard_clip() {
        for model in DistortionModel::ALL {
            let mut dist = prepared();
            dist.set_threshold(0.3);
            dist.set_drive(6.0);
            dist.set_distortion_model(model);

            let mut expected = prepared();
            expected.set_threshold(0.3);
            expected.set_drive(6.0);

            for i in 0..1500 {
                let x = (i as f32 * 0.01).sin() * 0.4;
                assert_eq!(dist.process_sample(x), expected.process_sample(x), "{model}");
            }
        }
    }

    #[test]
    fn model_names_parse() {
        for model in DistortionModel::ALL {
            assert_eq!(model.name().parse::<DistortionModel>(), Ok(model));
        }
        assert_eq!("Soft".parse::<DistortionModel>(), Ok(DistortionModel::SoftClip));
        assert_eq!("fuzz".parse::<DistortionModel>(), Err(UnknownModel));
    }

    #[test]
    fn bypass_does_not_advance_ramps() {
        let input = [0.5f32; 256];
        let mut scratch = [0.0f32; 256];

        let mut bypassed = prepared();
        let mut direct = prepared();
        for dist in [&mut bypassed, &mut direct] {
            dist.set_threshold(1.0);
            dist.set_drive(12.0);
        }

        {
            let channels = [&input[..]];
            let mut outputs = [&mut scratch[..]];
            bypassed.process(ProcessContext::new(&channels, &mut outputs).with_bypass(true));
        }
        assert_eq!(scratch, input);

        for _ in 0..200 {
            assert_eq!(bypassed.process_sample(0.05), direct.process_sample(0.05));
        }
    }
}
