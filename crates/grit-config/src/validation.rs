//! Parameter and settings validation.
//!
//! Values are checked against [`PARAMETER_LAYOUT`](crate::PARAMETER_LAYOUT):
//! the id must exist, the value must be finite, and it must lie inside the
//! descriptor's `[min, max]`.
//!
//! # Example
//!
//! ```rust
//! use grit_config::{validate_param, ValidationError};
//!
//! assert!(validate_param("drive", 12.0).is_ok());
//! assert!(matches!(
//!     validate_param("drive", 30.0),
//!     Err(ValidationError::OutOfRange { .. })
//! ));
//! ```

use thiserror::Error;

use crate::params::find_param;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter id.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Id of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// NaN or infinite value.
    #[error("parameter '{param}' must be finite, got {value}")]
    NonFinite {
        /// Id of the parameter.
        param: String,
        /// The offending value.
        value: f32,
    },

    /// Value text could not be parsed.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Id of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate one value for the parameter with the given id.
pub fn validate_param(id: &str, value: f32) -> ValidationResult<()> {
    let desc = find_param(id).ok_or_else(|| ValidationError::UnknownParameter(id.to_string()))?;
    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            param: desc.id.to_string(),
            value,
        });
    }
    if !desc.contains(value) {
        return Err(ValidationError::OutOfRange {
            param: desc.id.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        });
    }
    Ok(())
}

/// Fold a list of errors into a single result.
///
/// No errors is `Ok`, one error is returned as-is, more become
/// [`ValidationError::Multiple`].
pub fn collect_errors(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_values_inside_the_layout() {
        assert!(validate_param("drive", 0.0).is_ok());
        assert!(validate_param("drive", 24.0).is_ok());
        assert!(validate_param("mix", 0.5).is_ok());
        assert!(validate_param("output", -24.0).is_ok());
        assert!(validate_param("threshold", 1.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        let err = validate_param("output", 30.0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                param: "output".to_string(),
                value: 30.0,
                min: -24.0,
                max: 24.0,
            }
        );
        assert!(validate_param("mix", -0.01).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(matches!(
            validate_param("threshold", f32::NAN),
            Err(ValidationError::NonFinite { .. })
        ));
        assert!(matches!(
            validate_param("drive", f32::INFINITY),
            Err(ValidationError::NonFinite { .. })
        ));
    }

    #[test]
    fn rejects_unknown_ids() {
        assert_eq!(
            validate_param("tone", 0.5),
            Err(ValidationError::UnknownParameter("tone".to_string()))
        );
    }

    #[test]
    fn collect_errors_shapes() {
        assert!(collect_errors(Vec::new()).is_ok());

        let single = ValidationError::UnknownParameter("a".to_string());
        assert_eq!(collect_errors(vec![single.clone()]), Err(single));

        let many = vec![
            ValidationError::UnknownParameter("a".to_string()),
            ValidationError::UnknownParameter("b".to_string()),
        ];
        let err = collect_errors(many).unwrap_err();
        assert!(matches!(err, ValidationError::Multiple(ref v) if v.len() == 2));
        assert_eq!(
            err.to_string(),
            "multiple validation errors: unknown parameter 'a'; unknown parameter 'b'"
        );
    }
}
