//! Parameter layout of the distortion.
//!
//! Each control is described by a [`ParamDescriptor`] carrying its stable id,
//! display name, unit, range and default. [`PARAMETER_LAYOUT`] lists them in
//! host order.

use crate::validation::{ValidationError, ValidationResult};

/// Unit of a parameter's plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels, converted to linear gain inside the engine.
    Decibels,
    /// Fraction in `[0, 1]`, displayed as a percentage.
    Fraction,
    /// Linear amplitude.
    Linear,
}

impl ParamUnit {
    /// Short label for listings.
    ///
    /// ```rust
    /// use grit_config::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.label(), "dB");
    /// assert_eq!(ParamUnit::Fraction.label(), "fraction");
    /// ```
    pub const fn label(self) -> &'static str {
        match self {
            ParamUnit::Decibels => "dB",
            ParamUnit::Fraction => "fraction",
            ParamUnit::Linear => "linear",
        }
    }
}

/// Metadata for one control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Stable id used in presets and on the command line.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Unit of the plain value.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Value pushed into the engine when nothing else is specified.
    pub default: f32,
    /// Recommended increment for stepped controls.
    pub step: f32,
}

impl ParamDescriptor {
    /// `true` if `value` lies inside `[min, max]`.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps a value to the valid range.
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Converts a plain value to `[0, 1]`.
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (value - self.min) / range
    }

    /// Converts a normalized `[0, 1]` value back to the plain range.
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized * (self.max - self.min)
    }

    /// Formats a plain value with its unit.
    ///
    /// ```rust
    /// use grit_config::find_param;
    ///
    /// let mix = find_param("mix").unwrap();
    /// assert_eq!(mix.format_value(0.25), "25%");
    /// ```
    pub fn format_value(&self, value: f32) -> String {
        match self.unit {
            ParamUnit::Decibels => format!("{value:.1} dB"),
            ParamUnit::Fraction => format!("{:.0}%", value * 100.0),
            ParamUnit::Linear => format!("{value:.3}"),
        }
    }

    /// Parses value text into this parameter's plain unit.
    ///
    /// Accepts plain numbers, a `%` suffix (divided by 100) and a `dB`
    /// suffix. For decibel parameters `dB` is just stripped; for the others
    /// it is converted to linear gain. Percentages are rejected for decibel
    /// parameters. The result is not range-checked.
    ///
    /// ```rust
    /// use grit_config::find_param;
    ///
    /// let threshold = find_param("threshold").unwrap();
    /// assert_eq!(threshold.parse("50%").unwrap(), 0.5);
    /// assert!((threshold.parse("-6dB").unwrap() - 0.501).abs() < 1e-3);
    ///
    /// let drive = find_param("drive").unwrap();
    /// assert_eq!(drive.parse("12dB").unwrap(), 12.0);
    /// ```
    pub fn parse(&self, text: &str) -> ValidationResult<f32> {
        let text = text.trim();

        if let Some(pct) = text.strip_suffix('%') {
            if self.unit == ParamUnit::Decibels {
                return Err(self.format_error("percent is not valid for a dB parameter"));
            }
            return self.parse_number(pct).map(|v| v / 100.0);
        }

        if let Some(db) = text
            .strip_suffix("dB")
            .or_else(|| text.strip_suffix("db"))
            .or_else(|| text.strip_suffix("DB"))
        {
            let db = self.parse_number(db)?;
            return Ok(match self.unit {
                ParamUnit::Decibels => db,
                ParamUnit::Fraction | ParamUnit::Linear => libm::powf(10.0, db / 20.0),
            });
        }

        self.parse_number(text)
    }

    fn parse_number(&self, text: &str) -> ValidationResult<f32> {
        let text = text.trim();
        text.parse::<f32>()
            .map_err(|_| self.format_error(&format!("cannot parse '{text}' as number")))
    }

    fn format_error(&self, reason: &str) -> ValidationError {
        ValidationError::InvalidFormat {
            param: self.id.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Drive applied before clipping, in dB.
pub const DRIVE: ParamDescriptor = ParamDescriptor {
    id: "drive",
    name: "Drive",
    unit: ParamUnit::Decibels,
    min: 0.0,
    max: 24.0,
    default: 0.0,
    step: 0.1,
};

/// Dry/wet blend, 0 = dry.
pub const MIX: ParamDescriptor = ParamDescriptor {
    id: "mix",
    name: "Mix",
    unit: ParamUnit::Fraction,
    min: 0.0,
    max: 1.0,
    default: 0.0,
    step: 0.01,
};

/// Output trim, in dB.
pub const OUTPUT: ParamDescriptor = ParamDescriptor {
    id: "output",
    name: "Output",
    unit: ParamUnit::Decibels,
    min: -24.0,
    max: 24.0,
    default: 0.0,
    step: 0.1,
};

/// Clip ceiling as linear amplitude.
pub const THRESHOLD: ParamDescriptor = ParamDescriptor {
    id: "threshold",
    name: "Threshold",
    unit: ParamUnit::Linear,
    min: 0.0,
    max: 1.0,
    default: 1.0,
    step: 0.01,
};

/// Every control, in host order.
pub static PARAMETER_LAYOUT: [ParamDescriptor; 4] = [DRIVE, MIX, OUTPUT, THRESHOLD];

/// Finds a descriptor by id or display name, case-insensitively.
///
/// `"input"` is accepted as an alias for `"drive"`.
pub fn find_param(id: &str) -> Option<&'static ParamDescriptor> {
    let id = id.trim();
    if id.eq_ignore_ascii_case("input") {
        return Some(&PARAMETER_LAYOUT[0]);
    }
    PARAMETER_LAYOUT
        .iter()
        .find(|d| d.id.eq_ignore_ascii_case(id) || d.name.eq_ignore_ascii_case(id))
}

/// Parses value text for the parameter with the given id.
///
/// See [`ParamDescriptor::parse`] for the accepted forms.
pub fn parse_param_value(id: &str, text: &str) -> ValidationResult<f32> {
    let desc = find_param(id).ok_or_else(|| ValidationError::UnknownParameter(id.to_string()))?;
    desc.parse(text)
}
