//! Audio file I/O for the grit distortion.
//!
//! This crate loads and saves WAV files as planar `f32` buffers, one `Vec`
//! per channel, which is the layout the engine's block processing takes.
//!
//! - [`read_wav`] / [`write_wav`] for sample data
//! - [`read_wav_info`] for header-only inspection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use grit_io::{read_wav, write_wav};
//!
//! let (mut channels, spec) = read_wav("input.wav")?;
//! for channel in &mut channels {
//!     for sample in channel.iter_mut() {
//!         *sample *= 0.5;
//!     }
//! }
//! write_wav("output.wav", &channels, spec)?;
//! # Ok::<(), grit_io::Error>(())
//! ```

mod wav;

pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file's sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The requested output bit depth is not supported.
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// Channel buffers cannot be written as one file.
    #[error("Invalid channel layout: {0}")]
    InvalidChannels(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
