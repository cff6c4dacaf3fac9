//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use grit_config::{ConfigError, Preset, get_factory_preset};
use grit_core::Sample;
use std::path::Path;

/// Load a preset by factory name or TOML path.
///
/// Factory presets are tried first; anything else must be an existing file,
/// otherwise the error is [`ConfigError::PresetNotFound`]. The returned
/// preset has been validated.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    let preset = if let Some(preset) = get_factory_preset(name) {
        preset
    } else {
        let path = Path::new(name);
        if !path.exists() {
            return Err(ConfigError::PresetNotFound(name.to_string()))
                .context("use 'grit presets list' to see factory presets");
        }
        Preset::load(path)?
    };

    preset
        .validate()
        .with_context(|| format!("preset '{}' is invalid", preset.name))?;
    Ok(preset)
}

/// Root-mean-square level of a buffer.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Largest absolute sample.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

/// Linear level to dB, floored at -120.
pub fn linear_to_db(linear: f32) -> f32 {
    linear.gain_to_db().max(-120.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(rms(&[]), 0.0);
        assert!((rms(&[1.0, -1.0]) - 1.0).abs() < 1e-6);
        assert_eq!(peak(&[0.2, -0.7, 0.5]), 0.7);
        assert_eq!(linear_to_db(0.0), -120.0);
        assert!((linear_to_db(0.5) + 6.0206).abs() < 1e-3);
    }

    #[test]
    fn factory_names_resolve() {
        assert_eq!(load_preset("crunch").unwrap().name, "Crunch");
    }

    #[test]
    fn missing_preset_reports_not_found() {
        let err = load_preset("definitely-not-a-preset").unwrap_err();
        match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::PresetNotFound(name)) => {
                assert_eq!(name, "definitely-not-a-preset");
            }
            other => panic!("expected PresetNotFound, got {other:?}"),
        }
    }
}
