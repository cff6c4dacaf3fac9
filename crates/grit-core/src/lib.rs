//! Grit Core - click-free distortion DSP
//!
//! This crate provides the real-time part of the grit distortion: a linear
//! parameter smoother and a distortion engine built on it, designed for
//! real-time audio processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Trait for per-sample effects with block processing and bypass
//! - [`ProcessSpec`] - Sample rate, block size and channel count for `prepare`
//! - [`ProcessContext`] - Planar input/output block plus bypass flag
//!
//! ## Parameter Smoothing
//!
//! - [`SmoothedValue`] - Linear ramps that land exactly on target
//!
//! ## Distortion
//!
//! - [`Distortion`] - Drive, threshold clip, dry/wet mix and output trim
//! - [`DistortionParams`] - Lock-free control targets shared with other threads
//! - [`DistortionModel`] - Waveshaping model selector
//!
//! ## Precision
//!
//! - [`Sample`] - Implemented for `f32` and `f64`
//! - [`AtomicSample`] - Lock-free cell for a single sample value
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc` for the shared
//! parameter block). Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! grit-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use grit_core::{Distortion, Effect, ProcessContext, ProcessSpec};
//!
//! let mut dist = Distortion::<f32>::new();
//! dist.prepare(&ProcessSpec::new(48000.0, 128, 2));
//! dist.set_drive(12.0);
//! dist.set_threshold(0.5);
//! dist.set_mix(1.0);
//!
//! let left = [0.2f32; 128];
//! let right = [-0.2f32; 128];
//! let input = [&left[..], &right[..]];
//! let mut out_l = [0.0f32; 128];
//! let mut out_r = [0.0f32; 128];
//! let mut output = [&mut out_l[..], &mut out_r[..]];
//!
//! dist.process(ProcessContext::new(&input, &mut output));
//! ```
//!
//! # Features
//!
//! - `std` (default) - use `std::sync::Arc` instead of `alloc`
//! - `tracing` - debug events from `prepare`/`reset`
//! - `serde` - `Serialize`/`Deserialize` for [`DistortionModel`]

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod block;
pub mod distortion;
pub mod effect;
pub mod param;
pub mod sample;

pub use block::{ProcessContext, ProcessSpec};
pub use distortion::{
    DEFAULT_DRIVE_DB, DEFAULT_MIX, DEFAULT_OUTPUT_DB, DEFAULT_THRESHOLD, Distortion,
    DistortionModel, DistortionParams, RAMP_SECONDS, UnknownModel,
};
pub use effect::Effect;
pub use param::SmoothedValue;
pub use sample::{AtomicSample, Sample};
