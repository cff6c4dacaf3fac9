//! File-based distortion processing command.

use crate::commands::common::{linear_to_db, load_preset, peak, rms};
use anyhow::Context;
use clap::{Args, ValueEnum};
use grit_config::DistortionSettings;
use grit_core::{Distortion, DistortionModel, Effect, ProcessContext, ProcessSpec, Sample};
use grit_io::{WavSpec, read_wav, write_wav};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Sample precision used by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Precision {
    /// Single precision
    #[default]
    F32,
    /// Double precision
    F64,
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Factory preset name or preset TOML file
    #[arg(short, long)]
    preset: Option<String>,

    /// Drive in dB (e.g. "12" or "12dB")
    #[arg(long, allow_hyphen_values = true)]
    drive: Option<String>,

    /// Dry/wet mix (e.g. "0.5" or "50%")
    #[arg(long, allow_hyphen_values = true)]
    mix: Option<String>,

    /// Output trim in dB
    #[arg(long, allow_hyphen_values = true)]
    output_gain: Option<String>,

    /// Clip threshold, linear or dB (e.g. "0.5" or "-6dB")
    #[arg(long, allow_hyphen_values = true)]
    threshold: Option<String>,

    /// Parameter by id (e.g. "drive=15"), repeatable
    #[arg(long, value_parser = parse_key_val, num_args = 1)]
    param: Vec<(String, String)>,

    /// Waveshaping model (hard_clip, soft_clip, saturation)
    #[arg(short, long)]
    model: Option<DistortionModel>,

    /// Copy input to output without processing
    #[arg(long)]
    bypass: bool,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Engine sample precision
    #[arg(long, value_enum, default_value_t = Precision::F32)]
    precision: Precision,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("Invalid parameter format: '{s}' (expected key=value)"))
}

/// Resolve the preset and flag overrides into one validated settings value.
fn build_settings(args: &ProcessArgs) -> anyhow::Result<DistortionSettings> {
    let mut settings = match &args.preset {
        Some(name) => {
            let preset = load_preset(name)?;
            println!("Loading preset: {}", preset.name);
            preset.settings
        }
        None => DistortionSettings::default(),
    };

    let flags = [
        ("drive", &args.drive),
        ("mix", &args.mix),
        ("output", &args.output_gain),
        ("threshold", &args.threshold),
    ];
    for (id, value) in flags {
        if let Some(text) = value {
            settings
                .set_param_text(id, text)
                .with_context(|| format!("invalid --{id} value"))?;
        }
    }
    for (id, text) in &args.param {
        settings
            .set_param_text(id, text)
            .with_context(|| format!("invalid --param {id}={text}"))?;
    }

    if let Some(model) = args.model {
        settings.model = model;
    }
    settings.bypassed |= args.bypass;
    Ok(settings)
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("--block-size must be at least 1");
    }
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        anyhow::bail!("--bit-depth must be 16, 24 or 32, got {}", args.bit_depth);
    }

    let settings = build_settings(&args)?;

    println!("Reading {}...", args.input.display());
    let (channels, spec) = read_wav(&args.input)?;
    let frames = channels.first().map_or(0, Vec::len);
    println!(
        "  {} channel(s), {} frames, {} Hz, {:.2}s",
        channels.len(),
        frames,
        spec.sample_rate,
        frames as f64 / f64::from(spec.sample_rate)
    );

    println!("Settings:");
    for (desc, value) in settings.values() {
        println!("  {:10} {}", desc.name, desc.format_value(value));
    }
    println!("  {:10} {}", "Model", settings.model);
    if !settings.model.is_implemented() {
        println!("  (model '{}' currently renders as hard_clip)", settings.model);
    }
    if settings.bypassed {
        println!("  Bypassed");
    }

    tracing::info!(
        drive_db = settings.drive_db,
        mix = settings.mix,
        output_db = settings.output_db,
        threshold = settings.threshold,
        model = %settings.model,
        bypassed = settings.bypassed,
        precision = ?args.precision,
        block_size = args.block_size,
        "processing"
    );

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let sample_rate = f64::from(spec.sample_rate);
    let processed = match args.precision {
        Precision::F32 => render::<f32>(&channels, &settings, sample_rate, args.block_size, &pb),
        Precision::F64 => render::<f64>(&channels, &settings, sample_rate, args.block_size, &pb),
    };
    pb.finish_with_message("done");

    let input_all: Vec<f32> = channels.concat();
    let output_all: Vec<f32> = processed.concat();
    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&input_all)),
        linear_to_db(peak(&input_all))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output_all)),
        linear_to_db(peak(&output_all))
    );

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &processed, out_spec)?;
    println!("Done!");

    Ok(())
}

/// Run planar audio through a freshly prepared engine, block by block.
///
/// The settings are applied after `prepare`, so the opening 20 ms ramps from the
/// engine's reset defaults (fully wet, threshold 0) to the requested values.
/// The opening samples of every render are therefore quieter than the rest.
fn render<T: Sample>(
    channels: &[Vec<f32>],
    settings: &DistortionSettings,
    sample_rate: f64,
    block_size: usize,
    pb: &ProgressBar,
) -> Vec<Vec<f32>> {
    let frames = channels.first().map_or(0, Vec::len);

    let mut engine = Distortion::<T>::new();
    engine.prepare(&ProcessSpec::new(sample_rate, block_size, channels.len()));
    settings.apply_to(&engine.params());

    let input: Vec<Vec<T>> = channels
        .iter()
        .map(|ch| ch.iter().map(|&s| T::from_f64(f64::from(s))).collect())
        .collect();
    let mut output: Vec<Vec<T>> = vec![vec![T::ZERO; frames]; channels.len()];

    let mut start = 0;
    while start < frames {
        let end = (start + block_size).min(frames);
        let in_block: Vec<&[T]> = input.iter().map(|ch| &ch[start..end]).collect();
        let mut out_block: Vec<&mut [T]> =
            output.iter_mut().map(|ch| &mut ch[start..end]).collect();
        engine.process(ProcessContext::new(&in_block, &mut out_block).with_bypass(settings.bypassed));
        pb.set_position(end as u64);
        start = end;
    }

    output
        .into_iter()
        .map(|ch| ch.into_iter().map(|s| s.to_f64() as f32).collect())
        .collect()
}
