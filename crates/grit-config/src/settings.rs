//! Plain, serializable values for every distortion control.

use grit_core::{DistortionModel, DistortionParams, Sample};
use serde::{Deserialize, Serialize};

use crate::params::{DRIVE, MIX, OUTPUT, PARAMETER_LAYOUT, ParamDescriptor, THRESHOLD, find_param};
use crate::validation::{ValidationError, ValidationResult, collect_errors, validate_param};

/// Control values in host units.
///
/// `Default` gives the layout defaults. Missing TOML fields fall back to
/// them as well.
///
/// # Example
///
/// ```rust
/// use grit_config::DistortionSettings;
/// use grit_core::{Distortion, Effect, ProcessSpec};
///
/// let mut settings = DistortionSettings::default();
/// settings.set_param("drive", 12.0).unwrap();
/// settings.set_param("mix", 1.0).unwrap();
///
/// let mut engine = Distortion::<f32>::new();
/// engine.prepare(&ProcessSpec::new(48000.0, 256, 2));
/// settings.apply_to(&engine.params());
///
/// assert_eq!(engine.params().drive(), 12.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistortionSettings {
    /// Drive before clipping, in dB.
    pub drive_db: f32,
    /// Dry/wet blend, 0 = dry.
    pub mix: f32,
    /// Output trim, in dB.
    pub output_db: f32,
    /// Clip ceiling, linear amplitude.
    pub threshold: f32,
    /// Waveshaping model.
    pub model: DistortionModel,
    /// Pass input through untouched.
    pub bypassed: bool,
}

impl Default for DistortionSettings {
    fn default() -> Self {
        Self {
            drive_db: DRIVE.default,
            mix: MIX.default,
            output_db: OUTPUT.default,
            threshold: THRESHOLD.default,
            model: DistortionModel::default(),
            bypassed: false,
        }
    }
}

impl DistortionSettings {
    /// Value of the parameter with the given id.
    pub fn get_param(&self, id: &str) -> Option<f32> {
        let index = layout_index(id)?;
        Some(*self.slots()[index])
    }

    /// Validate and store one value by parameter id.
    ///
    /// The stored value is left unchanged on error.
    pub fn set_param(&mut self, id: &str, value: f32) -> ValidationResult<()> {
        validate_param(id, value)?;
        let index =
            layout_index(id).ok_or_else(|| ValidationError::UnknownParameter(id.to_string()))?;
        *self.slots_mut()[index] = value;
        Ok(())
    }

    /// Parse value text (see [`ParamDescriptor::parse`]) and store it.
    pub fn set_param_text(&mut self, id: &str, text: &str) -> ValidationResult<()> {
        let desc = find_param(id).ok_or_else(|| ValidationError::UnknownParameter(id.to_string()))?;
        let value = desc.parse(text)?;
        self.set_param(desc.id, value)
    }

    /// Every control with its current value, in layout order.
    pub fn values(&self) -> [(&'static ParamDescriptor, f32); 4] {
        let slots = self.slots();
        core::array::from_fn(|i| (&PARAMETER_LAYOUT[i], *slots[i]))
    }

    /// Check every value against the layout.
    ///
    /// All failures are reported, not just the first.
    pub fn validate(&self) -> ValidationResult<()> {
        let errors = self
            .values()
            .into_iter()
            .filter_map(|(desc, value)| validate_param(desc.id, value).err())
            .collect();
        collect_errors(errors)
    }

    /// Push every control target and the model into a running engine.
    ///
    /// The engine ramps to the new targets on its next processed samples.
    /// Bypass is a property of the processing call, so it is not applied here.
    pub fn apply_to<T: Sample>(&self, params: &DistortionParams<T>) {
        params.set_drive(T::from_f64(f64::from(self.drive_db)));
        params.set_mix(T::from_f64(f64::from(self.mix)));
        params.set_output(T::from_f64(f64::from(self.output_db)));
        params.set_threshold(T::from_f64(f64::from(self.threshold)));
        params.set_distortion_model(self.model);
    }

    /// Fields in `PARAMETER_LAYOUT` order.
    fn slots(&self) -> [&f32; 4] {
        [&self.drive_db, &self.mix, &self.output_db, &self.threshold]
    }

    fn slots_mut(&mut self) -> [&mut f32; 4] {
        [
            &mut self.drive_db,
            &mut self.mix,
            &mut self.output_db,
            &mut self.threshold,
        ]
    }
}

/// Position of a parameter in `PARAMETER_LAYOUT`, resolving names and aliases.
fn layout_index(id: &str) -> Option<usize> {
    let desc = find_param(id)?;
    PARAMETER_LAYOUT.iter().position(|d| d.id == desc.id)
}
