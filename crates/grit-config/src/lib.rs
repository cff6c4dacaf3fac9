//! Parameter layout, settings and presets for the grit distortion.
//!
//! This crate sits between user-facing configuration and the real-time
//! engine in `grit-core`: it describes every control, validates values
//! against that description, stores them in TOML presets, and pushes them
//! into a running engine.
//!
//! # Features
//!
//! - **Parameter Layout**: ids, ranges, units and defaults for each control
//! - **Validation**: range and finiteness checks with aggregated errors
//! - **Preset System**: load and save settings as TOML files
//! - **Factory Presets**: built-in starting points
//!
//! # Example
//!
//! ```rust,no_run
//! use grit_config::{DistortionSettings, Preset};
//! use grit_core::{Distortion, Effect, ProcessSpec};
//!
//! let preset = Preset::load("crunch.toml").unwrap();
//! preset.validate().unwrap();
//!
//! let mut engine = Distortion::<f32>::new();
//! engine.prepare(&ProcessSpec::new(48000.0, 512, 2));
//! preset.settings.apply_to(&engine.params());
//!
//! let custom = Preset::new("Custom").with_settings(DistortionSettings {
//!     drive_db: 9.0,
//!     mix: 1.0,
//!     ..DistortionSettings::default()
//! });
//! custom.save("presets/custom.toml").unwrap();
//! ```

mod error;
mod preset;
mod settings;

/// Parameter descriptors and value parsing.
pub mod params;

/// Settings validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset,
};
pub use params::{PARAMETER_LAYOUT, ParamDescriptor, ParamUnit, find_param, parse_param_value};
pub use preset::Preset;
pub use settings::DistortionSettings;
pub use validation::{ValidationError, ValidationResult, validate_param};
