//! Core Effect trait.
//!
//! The [`Effect`] trait is the seam between a host and a DSP unit. A host
//! calls [`prepare`](Effect::prepare) whenever its audio configuration
//! changes and [`process`](Effect::process) once per audio block.
//!
//! ## Design Decisions
//!
//! - **Generic precision**: `Effect<T>` is implemented per [`Sample`] type so
//!   the same unit runs at `f32` or `f64`.
//!
//! - **Per-sample core**: implementors only write
//!   [`process_sample`](Effect::process_sample); block iteration and bypass
//!   handling come from the default [`process`](Effect::process).
//!
//! - **No allocations**: all methods are designed to be called in real-time
//!   audio contexts with zero heap allocations.

use crate::{ProcessContext, ProcessSpec, Sample};

/// Core trait for audio effects.
///
/// # Example
///
/// ```rust
/// use grit_core::{Effect, ProcessContext, ProcessSpec};
///
/// struct Gain(f32);
///
/// impl Effect<f32> for Gain {
///     fn prepare(&mut self, _spec: &ProcessSpec) {}
///
///     fn reset(&mut self) {}
///
///     fn process_sample(&mut self, input: f32) -> f32 {
///         input * self.0
///     }
/// }
///
/// let samples = [1.0f32, 2.0];
/// let input = [&samples[..]];
/// let mut out = [0.0f32; 2];
/// let mut output = [&mut out[..]];
///
/// let mut gain = Gain(0.5);
/// gain.process(ProcessContext::new(&input, &mut output));
/// assert_eq!(out, [0.5, 1.0]);
/// ```
pub trait Effect<T: Sample> {
    /// Bind the audio configuration and reset internal state.
    fn prepare(&mut self, spec: &ProcessSpec);

    /// Reset internal state for the bound configuration.
    fn reset(&mut self);

    /// Process a single sample.
    ///
    /// For effects with internal state (smoothers, filters), this advances
    /// the state by one sample.
    fn process_sample(&mut self, input: T) -> T;

    /// Process one block.
    ///
    /// When the context is bypassed the input is copied to the output and
    /// [`process_sample`](Self::process_sample) is never called, so internal
    /// state (including parameter ramps) is frozen until the next active
    /// block. Otherwise channels are processed in index order, and samples
    /// within a channel in index order.
    ///
    /// # Panics
    ///
    /// In debug builds, panics before touching any sample if input and output
    /// shapes differ. Release builds process only the overlapping region.
    fn process(&mut self, context: ProcessContext<'_, '_, T>) {
        debug_assert!(
            context.shapes_match(),
            "input and output blocks must have the same channel and sample counts"
        );

        let is_bypassed = context.is_bypassed;
        let (input, output) = context.split();

        if is_bypassed {
            for (inp, out) in input.iter().zip(output.iter_mut()) {
                let len = inp.len().min(out.len());
                out[..len].copy_from_slice(&inp[..len]);
            }
            return;
        }

        for (inp, out) in input.iter().zip(output.iter_mut()) {
            for (x, y) in inp.iter().zip(out.iter_mut()) {
                *y = self.process_sample(*x);
            }
        }
    }

    /// Process one channel in place.
    fn process_block_inplace(&mut self, buffer: &mut [T]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }
}
