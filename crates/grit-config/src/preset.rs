//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::settings::DistortionSettings;

/// A named set of distortion settings.
///
/// Presets are stored as TOML. They can be loaded from files, created
/// programmatically, and saved to disk. Missing settings fall back to the
/// layout defaults.
///
/// # TOML Format
///
/// ```toml
/// name = "Crunch"
/// description = "Driven into a moderate clip"
///
/// [settings]
/// drive_db = 12.0
/// mix = 1.0
/// output_db = -4.0
/// threshold = 0.5
/// model = "hard_clip"
/// bypassed = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Control values.
    #[serde(default)]
    pub settings: DistortionSettings,
}

impl Preset {
    /// Create a preset holding the layout defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            settings: DistortionSettings::default(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the control values.
    pub fn with_settings(mut self, settings: DistortionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Load a preset from a TOML file.
    ///
    /// The values are parsed but not validated; call
    /// [`validate`](Self::validate) before applying them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the settings against the parameter layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.settings.validate()?;
        Ok(())
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
