//! Fast Ossifier Stratification Index (FOSSI)
//!
//! This module implements sex-specific FOSSI risk stratification for
//! accelerated ossification in diffuse idiopathic skeletal hyperostosis.
//! An evaluation runs the stages in order:
//!
//! 1. [`units`] normalizes lipids to mmol/L
//! 2. [`indices`] derives CMI (and VAI for women)
//! 3. [`score`] evaluates FOSSI-F or FOSSI-M
//! 4. [`category`] maps the score onto the risk bands
//! 5. [`curve`] samples the probability curve and places the patient on it

pub mod category;
pub mod curve;
pub mod indices;
pub mod score;
pub mod units;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::{InputError, Result};
use crate::models::patient::PatientInput;
use category::{RiskResult, classify};
use curve::{Curve, build_curve_with};
use indices::{DerivedIndices, compute_indices};
use units::{NormalizedLipids, normalize_panel};

/// Everything one evaluation produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub lipids: NormalizedLipids,
    pub indices: DerivedIndices,
    pub risk: RiskResult,
    /// Curve for the patient's sex with the patient marker placed
    pub curve: Curve,
}

impl Assessment {
    /// Split into the result pair returned by [`evaluate`]
    #[must_use]
    pub fn into_parts(self) -> (RiskResult, Curve) {
        (self.risk, self.curve)
    }
}

/// Score, classify and plot a patient with the default configuration
///
/// # Errors
/// Returns `InputError` for degenerate inputs; no partial result is produced.
pub fn evaluate(patient: &PatientInput) -> Result<(RiskResult, Curve)> {
    evaluate_with(patient, &EngineConfig::default()).map(Assessment::into_parts)
}

/// Run the full pipeline and keep every intermediate value
///
/// # Errors
/// Returns `InputError` for degenerate inputs or an invalid curve configuration.
pub fn evaluate_with(patient: &PatientInput, config: &EngineConfig) -> Result<Assessment> {
    let sex = patient.sex();
    let curve_config = config.curve_for(sex);
    curve_config.validate(sex)?;

    let lipids = normalize_panel(&patient.lipids())?;
    let indices = compute_indices(patient, &lipids)?;
    let value = score::score(patient, &indices)?;
    if !value.is_finite() {
        return Err(InputError::NonFinite { field: "score" });
    }

    let risk = classify(sex, value);
    let curve = build_curve_with(sex, &curve_config)?.with_patient(value);
    log::debug!(
        "Evaluated {sex} patient: score {value:.4}, category {}",
        risk.category
    );

    Ok(Assessment {
        lipids,
        indices,
        risk,
        curve,
    })
}
