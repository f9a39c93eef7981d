//! FOSSI linear risk equations
//!
//! FOSSI-F (females) is driven by insulin-resistance markers and uses both
//! CMI and VAI. FOSSI-M (males) uses CMI and waist circumference.

use crate::algorithm::fossi::indices::DerivedIndices;
use crate::error::{InputError, Result};
use crate::models::patient::PatientInput;

/// Coefficients of the female equation
pub mod female {
    pub const INTERCEPT: f64 = -18.811;
    pub const AGE: f64 = 0.209;
    pub const BMI: f64 = 0.350;
    pub const CMI: f64 = 1.359;
    pub const HYPERTENSION: f64 = 0.799;
    pub const VAI: f64 = 0.203;
}

/// Coefficients of the male equation
pub mod male {
    pub const INTERCEPT: f64 = -4.663;
    pub const AGE: f64 = 0.039;
    pub const BMI: f64 = 0.045;
    pub const CMI: f64 = -0.223;
    pub const WAIST: f64 = 0.015;
}

/// FOSSI-F = -18.811 + 0.209·age + 0.350·BMI + 1.359·CMI + 0.799·HT + 0.203·VAI
#[must_use]
pub fn female_score(age: u32, bmi: f64, cmi: f64, hypertension: bool, vai: f64) -> f64 {
    let ht = if hypertension { 1.0 } else { 0.0 };
    female::INTERCEPT
        + female::AGE * f64::from(age)
        + female::BMI * bmi
        + female::CMI * cmi
        + female::HYPERTENSION * ht
        + female::VAI * vai
}

/// FOSSI-M = -4.663 + 0.039·age + 0.045·BMI − 0.223·CMI + 0.015·waist
#[must_use]
pub fn male_score(age: u32, bmi: f64, cmi: f64, waist_cm: f64) -> f64 {
    male::INTERCEPT
        + male::AGE * f64::from(age)
        + male::BMI * bmi
        + male::CMI * cmi
        + male::WAIST * waist_cm
}

/// Evaluate the equation matching the patient's sex
///
/// # Errors
/// Returns `InputError::SexMismatch` if `indices` were derived for the other sex.
pub fn score(patient: &PatientInput, indices: &DerivedIndices) -> Result<f64> {
    if patient.sex() != indices.sex() {
        return Err(InputError::SexMismatch {
            patient: patient.sex().as_str(),
            indices: indices.sex().as_str(),
        });
    }

    let value = match *indices {
        DerivedIndices::Female { cmi, vai } => female_score(
            patient.age(),
            patient.bmi(),
            cmi,
            patient.hypertension(),
            vai,
        ),
        DerivedIndices::Male { cmi } => {
            male_score(patient.age(), patient.bmi(), cmi, patient.waist_cm())
        }
    };
    log::debug!("FOSSI score for {} patient: {value}", patient.sex());
    Ok(value)
}
