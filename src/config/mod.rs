//! Configuration for the FOSSI engine.

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::models::patient::Sex;

/// Default number of evenly spaced samples on each probability curve
pub const DEFAULT_CURVE_SAMPLES: usize = 600;

/// The female curve is plotted densely; fewer samples than this are rejected
pub const MIN_FEMALE_CURVE_SAMPLES: usize = 500;

/// Linear interpolation needs at least two sampled points
pub const MIN_MALE_CURVE_SAMPLES: usize = 2;

/// Sampling configuration for a single probability curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Number of evenly spaced points, endpoints included
    pub samples: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_CURVE_SAMPLES,
        }
    }
}

impl CurveConfig {
    /// Create a curve configuration with the given sample count
    #[must_use]
    pub const fn with_samples(samples: usize) -> Self {
        Self { samples }
    }

    /// Minimum sample count accepted for the given sex
    #[must_use]
    pub const fn min_samples(sex: Sex) -> usize {
        match sex {
            Sex::Female => MIN_FEMALE_CURVE_SAMPLES,
            Sex::Male => MIN_MALE_CURVE_SAMPLES,
        }
    }

    /// Check that this configuration can build the curve for `sex`
    pub fn validate(&self, sex: Sex) -> Result<()> {
        let min = Self::min_samples(sex);
        if self.samples < min {
            return Err(InputError::InvalidSampleCount {
                sex: sex.as_str(),
                samples: self.samples,
                min,
            });
        }
        Ok(())
    }
}

/// Configuration for a full evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Sampling of the female logistic curve
    pub female_curve: CurveConfig,
    /// Sampling of the male piecewise curve
    pub male_curve: CurveConfig,
}

impl EngineConfig {
    /// Create an engine configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the same sample count for both curves
    #[must_use]
    pub const fn with_samples(mut self, samples: usize) -> Self {
        self.female_curve = CurveConfig::with_samples(samples);
        self.male_curve = CurveConfig::with_samples(samples);
        self
    }

    /// Override sampling of the female curve
    #[must_use]
    pub const fn with_female_curve(mut self, curve: CurveConfig) -> Self {
        self.female_curve = curve;
        self
    }

    /// Override sampling of the male curve
    #[must_use]
    pub const fn with_male_curve(mut self, curve: CurveConfig) -> Self {
        self.male_curve = curve;
        self
    }

    /// Curve configuration that applies to `sex`
    #[must_use]
    pub const fn curve_for(&self, sex: Sex) -> CurveConfig {
        match sex {
            Sex::Female => self.female_curve,
            Sex::Male => self.male_curve,
        }
    }

    /// Validate both curve configurations
    pub fn validate(&self) -> Result<()> {
        self.female_curve.validate(Sex::Female)?;
        self.male_curve.validate(Sex::Male)
    }
}
