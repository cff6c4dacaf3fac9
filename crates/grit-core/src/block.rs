//! Audio block types passed from the host into an [`Effect`](crate::Effect).
//!
//! Blocks are planar: one slice per channel. [`ProcessContext`] pairs an
//! input block with an output block of the same shape and carries the
//! bypass flag for the call.

use crate::Sample;

/// Audio configuration handed to [`Effect::prepare`](crate::Effect::prepare).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Largest block the host will pass to a single process call
    pub maximum_block_size: usize,
    /// Number of channels processed per call
    pub num_channels: usize,
}

impl ProcessSpec {
    /// Create a spec.
    pub fn new(sample_rate: f64, maximum_block_size: usize, num_channels: usize) -> Self {
        Self {
            sample_rate,
            maximum_block_size,
            num_channels,
        }
    }
}

impl Default for ProcessSpec {
    fn default() -> Self {
        Self::new(48000.0, 512, 2)
    }
}

/// One block of planar audio to be processed.
///
/// `input` and `output` must have the same number of channels, and each
/// channel pair the same number of samples. See [`shapes_match`](Self::shapes_match).
///
/// # Example
///
/// ```rust
/// use grit_core::ProcessContext;
///
/// let left = [0.1f32, 0.2];
/// let right = [0.3f32, 0.4];
/// let input = [&left[..], &right[..]];
///
/// let mut out_l = [0.0f32; 2];
/// let mut out_r = [0.0f32; 2];
/// let mut output = [&mut out_l[..], &mut out_r[..]];
///
/// let context = ProcessContext::new(&input, &mut output);
/// assert!(context.shapes_match());
/// assert_eq!(context.num_samples(), 2);
/// ```
pub struct ProcessContext<'a, 'b, T: Sample> {
    input: &'a [&'b [T]],
    output: &'a mut [&'b mut [T]],
    /// When set, input is copied to output untouched.
    pub is_bypassed: bool,
}

impl<'a, 'b, T: Sample> ProcessContext<'a, 'b, T> {
    /// Pair an input block with an output block.
    pub fn new(input: &'a [&'b [T]], output: &'a mut [&'b mut [T]]) -> Self {
        Self {
            input,
            output,
            is_bypassed: false,
        }
    }

    /// Set the bypass flag.
    pub fn with_bypass(mut self, is_bypassed: bool) -> Self {
        self.is_bypassed = is_bypassed;
        self
    }

    /// Number of output channels.
    pub fn num_channels(&self) -> usize {
        self.output.len()
    }

    /// Number of samples in the first output channel (0 when there are none).
    pub fn num_samples(&self) -> usize {
        self.output.first().map_or(0, |channel| channel.len())
    }

    /// `true` if input and output have identical channel and sample counts.
    pub fn shapes_match(&self) -> bool {
        self.input.len() == self.output.len()
            && self
                .input
                .iter()
                .zip(self.output.iter())
                .all(|(inp, out)| inp.len() == out.len())
    }

    /// Split into the input channels and mutable output channels.
    pub fn split(self) -> (&'a [&'b [T]], &'a mut [&'b mut [T]]) {
        (self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_channel_count_detected() {
        let a = [0.0f32; 4];
        let input = [&a[..]];
        let mut x = [0.0f32; 4];
        let mut y = [0.0f32; 4];
        let mut output = [&mut x[..], &mut y[..]];

        let context = ProcessContext::new(&input, &mut output);
        assert!(!context.shapes_match());
    }

    #[test]
    fn mismatched_sample_count_detected() {
        let a = [0.0f64; 4];
        let input = [&a[..]];
        let mut x = [0.0f64; 3];
        let mut output = [&mut x[..]];

        let context = ProcessContext::new(&input, &mut output);
        assert!(!context.shapes_match());
    }

    #[test]
    fn empty_blocks_match() {
        let input: [&[f32]; 0] = [];
        let mut output: [&mut [f32]; 0] = [];
        let context = ProcessContext::new(&input, &mut output);
        assert!(context.shapes_match());
        assert_eq!(context.num_samples(), 0);
    }
}
