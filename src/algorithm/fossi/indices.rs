//! Derived anthropometric-lipid indices
//!
//! The Cardiometabolic Index (CMI) is computed for every patient. The
//! Visceral Adiposity Index (VAI) only exists on the female path, so the
//! result is a tagged value rather than a struct with an optional field.

use serde::{Deserialize, Serialize};

use crate::algorithm::fossi::units::NormalizedLipids;
use crate::error::{InputError, Result};
use crate::models::patient::{PatientInput, Sex};

/// VAI waist denominator intercept (female equation)
const VAI_WAIST_INTERCEPT: f64 = 36.58;
/// VAI waist denominator BMI slope (female equation)
const VAI_WAIST_BMI_SLOPE: f64 = 1.89;
/// Reference triglycerides in mmol/L
const VAI_TG_REFERENCE: f64 = 0.81;
/// Reference HDL cholesterol in mmol/L
const VAI_HDL_REFERENCE: f64 = 1.52;

/// Indices derived from a patient's anthropometry and lipids
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sex", rename_all = "lowercase")]
pub enum DerivedIndices {
    Female { cmi: f64, vai: f64 },
    Male { cmi: f64 },
}

impl DerivedIndices {
    /// Cardiometabolic Index
    #[must_use]
    pub const fn cmi(&self) -> f64 {
        match *self {
            Self::Female { cmi, .. } | Self::Male { cmi } => cmi,
        }
    }

    /// Visceral Adiposity Index, present only for females
    #[must_use]
    pub const fn vai(&self) -> Option<f64> {
        match *self {
            Self::Female { vai, .. } => Some(vai),
            Self::Male { .. } => None,
        }
    }

    /// Sex whose equation these indices feed
    #[must_use]
    pub const fn sex(&self) -> Sex {
        match self {
            Self::Female { .. } => Sex::Female,
            Self::Male { .. } => Sex::Male,
        }
    }
}

fn guard_denominator(quantity: &'static str, denominator: f64) -> Result<f64> {
    if denominator > 0.0 && denominator.is_finite() {
        Ok(denominator)
    } else {
        Err(InputError::DegenerateDenominator {
            quantity,
            denominator,
        })
    }
}

/// CMI = (TG / HDL) × (waist / height)
pub fn cardiometabolic_index(
    normalized: &NormalizedLipids,
    waist_cm: f64,
    height_cm: f64,
) -> Result<f64> {
    let hdl = guard_denominator("CMI", normalized.hdl_mmol)?;
    let height = guard_denominator("CMI", height_cm)?;
    Ok((normalized.tg_mmol / hdl) * (waist_cm / height))
}

/// VAI = [waist / (36.58 + 1.89 × BMI)] × (TG / 0.81) × (1.52 / HDL)
pub fn visceral_adiposity_index(
    normalized: &NormalizedLipids,
    waist_cm: f64,
    bmi: f64,
) -> Result<f64> {
    let waist_denominator =
        guard_denominator("VAI", VAI_WAIST_INTERCEPT + VAI_WAIST_BMI_SLOPE * bmi)?;
    let hdl = guard_denominator("VAI", normalized.hdl_mmol)?;
    Ok((waist_cm / waist_denominator)
        * (normalized.tg_mmol / VAI_TG_REFERENCE)
        * (VAI_HDL_REFERENCE / hdl))
}

/// Compute the indices that apply to this patient's sex
///
/// # Errors
/// Returns `InputError::DegenerateDenominator` when HDL, height or the VAI
/// waist denominator is not strictly positive.
pub fn compute_indices(
    patient: &PatientInput,
    normalized: &NormalizedLipids,
) -> Result<DerivedIndices> {
    let cmi = cardiometabolic_index(normalized, patient.waist_cm(), patient.height_cm())?;

    let indices = match patient.sex() {
        Sex::Female => DerivedIndices::Female {
            cmi,
            vai: visceral_adiposity_index(normalized, patient.waist_cm(), patient.bmi())?,
        },
        Sex::Male => DerivedIndices::Male { cmi },
    };
    log::debug!("Derived indices for {} patient: {indices:?}", patient.sex());
    Ok(indices)
}
