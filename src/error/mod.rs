//! Error handling for the FOSSI engine.
//!
//! Every failure the engine can produce is an input problem: a value out of
//! its accepted range, a degenerate denominator, or an unrecognised token.
//! Evaluation either succeeds completely or fails with one of these before
//! any result is built.

/// Errors raised when a numeric or categorical precondition is violated
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    /// Value outside its accepted closed range
    #[error("{field} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Value that must be strictly positive
    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// NaN or infinite input
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    /// A division in a derived index would divide by zero or a negative value
    #[error("Degenerate denominator while computing {quantity}: {denominator}")]
    DegenerateDenominator {
        quantity: &'static str,
        denominator: f64,
    },

    /// Sex token that is neither female nor male
    #[error("Unknown sex: {0:?} (expected \"female\" or \"male\")")]
    UnknownSex(String),

    /// Lipid unit token that is neither mmol/L nor mg/dL
    #[error("Unknown lipid unit: {0:?} (expected \"mmol/L\" or \"mg/dL\")")]
    UnknownUnit(String),

    /// Hypertension flag that is not 0/1 or a boolean
    #[error("Hypertension flag must be 0 or 1, got {0}")]
    InvalidFlag(i64),

    /// Derived indices computed for one sex were paired with a patient of the other
    #[error("Derived indices for {indices} cannot score a {patient} patient")]
    SexMismatch {
        patient: &'static str,
        indices: &'static str,
    },

    /// Curve sampling configuration that cannot produce a usable curve
    #[error("Curve for {sex} needs at least {min} samples, got {samples}")]
    InvalidSampleCount {
        sex: &'static str,
        samples: usize,
        min: usize,
    },
}

/// Result type for FOSSI operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Reject NaN and infinities for the named field
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NonFinite { field })
    }
}

/// Check that a finite value lies inside `[min, max]`
pub(crate) fn ensure_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
    let value = ensure_finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(InputError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Check that a finite value is strictly greater than zero
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    let value = ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(InputError::NonPositive { field, value })
    }
}
