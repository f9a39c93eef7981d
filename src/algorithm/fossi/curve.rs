//! Probability-of-event curves for FOSSI visualisation
//!
//! The female curve is a plain logistic sigmoid. The male curve is flat at a
//! baseline, rises through a steep logistic blend between 0.45 and 0.71, and
//! is flat at a ceiling afterwards. The blend is not pinned to the flat
//! segments, so the curve has tiny steps at both edges of the blend window.
//!
//! A patient's position is read off the sampled points by linear
//! interpolation so that a plotted marker always sits on the plotted line.

use serde::Serialize;
use smallvec::{SmallVec, smallvec};

use crate::algorithm::fossi::category::{FEMALE_CUTOFFS, MALE_CUTOFFS};
use crate::config::CurveConfig;
use crate::error::Result;
use crate::models::patient::Sex;

/// Plotted score range of the female curve
pub const FEMALE_DOMAIN: (f64, f64) = (2.5, 16.5);
/// Midpoint of the female sigmoid
pub const FEMALE_CENTER: f64 = 8.7;
/// Steepness of the female sigmoid
pub const FEMALE_SLOPE: f64 = 1.2;

/// Plotted score range of the male curve
pub const MALE_DOMAIN: (f64, f64) = (0.40, 1.00);
/// Probability below the blend window
pub const MALE_BASELINE: f64 = 0.12;
/// Probability above the blend window
pub const MALE_TOP: f64 = 0.98;
/// Blend window, both ends inclusive
pub const MALE_BLEND_WINDOW: (f64, f64) = (0.45, 0.71);
/// Midpoint of the male blend
pub const MALE_CENTER: f64 = 0.58;
/// Steepness of the male blend
pub const MALE_SLOPE: f64 = 92.0;

type Cutoffs = SmallVec<[f64; 3]>;
type ZoneLabels = SmallVec<[&'static str; 4]>;

/// A sampled point on a probability curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    pub probability: f64,
}

/// A sampled probability curve with its cut lines and zone names
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    sex: Sex,
    points: Vec<CurvePoint>,
    cutoffs: Cutoffs,
    zone_labels: ZoneLabels,
    domain: (f64, f64),
    #[serde(skip_serializing_if = "Option::is_none")]
    patient: Option<CurvePoint>,
}

impl Curve {
    #[must_use]
    pub const fn sex(&self) -> Sex {
        self.sex
    }

    /// Sampled points in ascending `x`
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Cut lines between adjacent zones, ascending
    #[must_use]
    pub fn cutoffs(&self) -> &[f64] {
        &self.cutoffs
    }

    /// One label per zone; always one more than the number of cutoffs
    #[must_use]
    pub fn zone_labels(&self) -> &[&'static str] {
        &self.zone_labels
    }

    /// `(min, max)` of the sampled `x` values
    #[must_use]
    pub const fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The patient's marker, once placed with [`Curve::with_patient`]
    #[must_use]
    pub const fn patient(&self) -> Option<CurvePoint> {
        self.patient
    }

    /// Place a patient's score on the curve
    #[must_use]
    pub fn with_patient(mut self, score: f64) -> Self {
        self.patient = Some(interpolate(&self, score));
        self
    }
}

/// Female probability at score `x`
#[must_use]
pub fn female_probability(x: f64) -> f64 {
    1.0 / (1.0 + (-FEMALE_SLOPE * (x - FEMALE_CENTER)).exp())
}

/// Male probability at score `x`
#[must_use]
pub fn male_probability(x: f64) -> f64 {
    let (start, end) = MALE_BLEND_WINDOW;
    if x < start {
        MALE_BASELINE
    } else if x > end {
        MALE_TOP
    } else {
        MALE_BASELINE + (MALE_TOP - MALE_BASELINE) / (1.0 + (-(x - MALE_CENTER) * MALE_SLOPE).exp())
    }
}

/// `samples` evenly spaced values from `min` to `max`, both included
fn linspace(min: f64, max: f64, samples: usize) -> impl Iterator<Item = f64> {
    let last = samples.saturating_sub(1);
    let step = if last == 0 {
        0.0
    } else {
        (max - min) / last as f64
    };
    (0..samples).map(move |i| if i == last { max } else { min + step * i as f64 })
}

fn sample_curve(sex: Sex, samples: usize) -> Curve {
    let (domain, cutoffs, zone_labels): ((f64, f64), Cutoffs, ZoneLabels) = match sex {
        Sex::Female => (
            FEMALE_DOMAIN,
            SmallVec::from_slice(&FEMALE_CUTOFFS),
            smallvec!["Low", "Intermediate", "High", "Very high"],
        ),
        Sex::Male => (
            MALE_DOMAIN,
            SmallVec::from_slice(&MALE_CUTOFFS),
            smallvec!["Grey/Low", "High"],
        ),
    };
    let probability = |x: f64| match sex {
        Sex::Female => female_probability(x),
        Sex::Male => male_probability(x),
    };

    let points = linspace(domain.0, domain.1, samples)
        .map(|x| CurvePoint {
            x,
            probability: probability(x),
        })
        .collect();

    Curve {
        sex,
        points,
        cutoffs,
        zone_labels,
        domain,
        patient: None,
    }
}

/// Build the curve for `sex` with the default sampling density
#[must_use]
pub fn build_curve(sex: Sex) -> Curve {
    sample_curve(sex, CurveConfig::default().samples)
}

/// Build the curve for `sex` with a custom sampling density
///
/// # Errors
/// Returns `InputError::InvalidSampleCount` if `config` is too sparse for `sex`.
pub fn build_curve_with(sex: Sex, config: &CurveConfig) -> Result<Curve> {
    config.validate(sex)?;
    Ok(sample_curve(sex, config.samples))
}

/// Read the probability at `score` off the sampled curve
///
/// Scores outside the sampled range take the first or last sampled
/// probability. Inside it, the two bracketing samples are joined linearly.
#[must_use]
pub fn interpolate(curve: &Curve, score: f64) -> CurvePoint {
    let points = curve.points();
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return CurvePoint {
            x: score,
            probability: f64::NAN,
        };
    };

    let probability = if score.is_nan() || score <= first.x {
        first.probability
    } else if score >= last.x {
        last.probability
    } else {
        // first.x < score < last.x, so 1 <= upper < points.len()
        let upper = points.partition_point(|p| p.x <= score);
        let (lo, hi) = (points[upper - 1], points[upper]);
        let t = (score - lo.x) / (hi.x - lo.x);
        lo.probability + t * (hi.probability - lo.probability)
    };

    CurvePoint {
        x: score,
        probability,
    }
}
