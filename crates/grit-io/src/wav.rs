//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
///
/// Opens the file, reads the header, and returns a [`WavInfo`] struct
/// with format details and duration.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
///
/// 32-bit files are written as IEEE float, 16- and 24-bit as integer PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24 or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Full-scale value for integer PCM at the given bit depth.
fn int_scale(bits: u16) -> f32 {
    (1i64 << (bits - 1)) as f32
}

/// Read a WAV file into planar channels.
///
/// Integer PCM is normalized to `[-1, 1)`. Returns one `Vec` per channel,
/// all of the same length.
///
/// # Example
/// ```no_run
/// let (channels, spec) = grit_io::read_wav("input.wav")?;
/// println!("{} channels of {} frames at {} Hz", channels.len(), channels[0].len(), spec.sample_rate);
/// # Ok::<(), grit_io::Error>(())
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<Vec<f32>>, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let hound_spec = reader.spec();
    let spec = WavSpec::from(hound_spec);
    let channels = usize::from(spec.channels);

    if channels == 0 {
        return Err(Error::InvalidChannels("file declares zero channels".to_string()));
    }

    let interleaved: Vec<f32> = match hound_spec.sample_format {
        SampleFormat::Float if spec.bits_per_sample == 32 => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Float => {
            return Err(Error::UnsupportedFormat(format!(
                "{}-bit float",
                spec.bits_per_sample
            )));
        }
        SampleFormat::Int => {
            let scale = int_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / channels;
    let mut planar: Vec<Vec<f32>> = (0..channels).map(|_| Vec::with_capacity(frames)).collect();
    for frame in interleaved.chunks_exact(channels) {
        for (channel, &sample) in planar.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    tracing::debug!(
        path = %path.display(),
        channels,
        frames,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "read wav"
    );

    Ok((planar, spec))
}

/// Write planar channels to a WAV file.
///
/// The channel count is taken from `channels`, overriding `spec.channels`.
/// 32-bit output is IEEE float; 16- and 24-bit output is clamped integer PCM.
///
/// # Example
/// ```no_run
/// use grit_io::{WavSpec, write_wav};
///
/// let silence = vec![vec![0.0f32; 48000]; 2];
/// write_wav("output.wav", &silence, WavSpec::default())?;
/// # Ok::<(), grit_io::Error>(())
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, channels: &[Vec<f32>], spec: WavSpec) -> Result<()> {
    let path = path.as_ref();

    if !matches!(spec.bits_per_sample, 16 | 24 | 32) {
        return Err(Error::UnsupportedBitDepth(spec.bits_per_sample));
    }
    let Some(first) = channels.first() else {
        return Err(Error::InvalidChannels("no channels to write".to_string()));
    };
    let frames = first.len();
    if channels.iter().any(|ch| ch.len() != frames) {
        return Err(Error::InvalidChannels(
            "channels have different lengths".to_string(),
        ));
    }
    let channel_count = u16::try_from(channels.len())
        .map_err(|_| Error::InvalidChannels(format!("{} channels", channels.len())))?;

    let spec = WavSpec {
        channels: channel_count,
        ..spec
    };
    let file = BufWriter::new(File::create(path)?);
    let mut writer = WavWriter::new(file, hound::WavSpec::from(spec))?;

    if spec.bits_per_sample == 32 {
        for frame in 0..frames {
            for channel in channels {
                writer.write_sample(channel[frame])?;
            }
        }
    } else {
        let scale = int_scale(spec.bits_per_sample);
        for frame in 0..frames {
            for channel in channels {
                let int_sample = (channel[frame] * scale).clamp(-scale, scale - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;

    tracing::debug!(
        path = %path.display(),
        channels = channel_count,
        frames,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "wrote wav"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn ramp(len: usize, scale: f32) -> Vec<f32> {
        (0..len).map(|i| (i as f32 / len as f32).sin() * scale).collect()
    }

    #[test]
    fn test_roundtrip_f32_stereo() {
        let channels = vec![ramp(1000, 1.0), ramp(1000, -0.5)];
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &channels, spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec, spec);
        assert_eq!(loaded, channels);
    }

    #[test]
    fn test_roundtrip_i16() {
        let channels = vec![ramp(1000, 0.9)];
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &channels, spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 44100);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].len(), 1000);

        // 16-bit has less precision
        for (a, b) in channels[0].iter().zip(loaded[0].iter()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_int_output_clamps() {
        let channels = vec![vec![2.0, -2.0, 1.0]];
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 16,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &channels, spec).unwrap();

        let (loaded, _) = read_wav(file.path()).unwrap();
        assert_eq!(loaded[0][1], -1.0);
        assert!(loaded[0][0] < 1.0 && loaded[0][0] > 0.999);
        assert_eq!(loaded[0][0], loaded[0][2]);
    }

    #[test]
    fn test_channel_count_follows_buffers() {
        let channels = vec![ramp(10, 1.0); 3];
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &channels, WavSpec::default()).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 3);
        assert_eq!(info.num_frames, 10);
    }

    #[test]
    fn test_rejects_bad_layouts() {
        let file = NamedTempFile::new().unwrap();

        let ragged = vec![vec![0.0; 10], vec![0.0; 9]];
        assert!(matches!(
            write_wav(file.path(), &ragged, WavSpec::default()),
            Err(Error::InvalidChannels(_))
        ));

        assert!(matches!(
            write_wav(file.path(), &[], WavSpec::default()),
            Err(Error::InvalidChannels(_))
        ));

        let spec = WavSpec {
            bits_per_sample: 8,
            ..WavSpec::default()
        };
        assert!(matches!(
            write_wav(file.path(), &[vec![0.0]], spec),
            Err(Error::UnsupportedBitDepth(8))
        ));
    }
}
