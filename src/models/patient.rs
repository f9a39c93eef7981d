//! Patient input types for FOSSI scoring.
//!
//! `PatientRecord` is the loose, serde-facing shape a caller hands in;
//! `PatientInput` is the validated, immutable value the engine scores.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result, ensure_positive, ensure_range};

/// Accepted age range in whole years
pub const AGE_RANGE: (u32, u32) = (18, 100);
/// Accepted BMI range in kg/m²
pub const BMI_RANGE: (f64, f64) = (10.0, 60.0);
/// Accepted height range in cm
pub const HEIGHT_RANGE_CM: (f64, f64) = (120.0, 220.0);
/// Accepted waist circumference range in cm
pub const WAIST_RANGE_CM: (f64, f64) = (50.0, 180.0);

/// Biological sex, selecting the FOSSI-F or FOSSI-M equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Lower-case token used in records and error messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }

    /// Capitalised name for display
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sex {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" | "f" | "woman" => Ok(Self::Female),
            "male" | "m" | "man" => Ok(Self::Male),
            _ => Err(InputError::UnknownSex(s.to_string())),
        }
    }
}

/// Unit the triglyceride and HDL values were entered in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LipidUnit {
    #[default]
    #[serde(rename = "mmol/L", alias = "mmol/l", alias = "mmol")]
    MmolPerL,
    #[serde(rename = "mg/dL", alias = "mg/dl", alias = "mg")]
    MgPerDl,
}

impl LipidUnit {
    /// Accepted triglyceride range in this unit
    #[must_use]
    pub const fn triglyceride_range(self) -> (f64, f64) {
        match self {
            Self::MmolPerL => (0.1, 20.0),
            Self::MgPerDl => (0.1, 2000.0),
        }
    }

    /// Accepted HDL cholesterol range in this unit
    #[must_use]
    pub const fn hdl_range(self) -> (f64, f64) {
        match self {
            Self::MmolPerL => (0.1, 10.0),
            Self::MgPerDl => (0.1, 400.0),
        }
    }

    /// Conventional spelling of the unit
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MmolPerL => "mmol/L",
            Self::MgPerDl => "mg/dL",
        }
    }
}

impl fmt::Display for LipidUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LipidUnit {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mmol/l" | "mmol" | "mmoll" => Ok(Self::MmolPerL),
            "mg/dl" | "mg" | "mgdl" => Ok(Self::MgPerDl),
            _ => Err(InputError::UnknownUnit(s.to_string())),
        }
    }
}

/// Triglyceride and HDL cholesterol measurements in a single unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LipidPanel {
    pub triglycerides: f64,
    pub hdl: f64,
    pub unit: LipidUnit,
}

impl LipidPanel {
    #[must_use]
    pub const fn new(triglycerides: f64, hdl: f64, unit: LipidUnit) -> Self {
        Self {
            triglycerides,
            hdl,
            unit,
        }
    }

    /// Lipids measured in mmol/L
    #[must_use]
    pub const fn mmol(triglycerides: f64, hdl: f64) -> Self {
        Self::new(triglycerides, hdl, LipidUnit::MmolPerL)
    }

    /// Lipids measured in mg/dL
    #[must_use]
    pub const fn mg_dl(triglycerides: f64, hdl: f64) -> Self {
        Self::new(triglycerides, hdl, LipidUnit::MgPerDl)
    }
}

/// A validated patient, immutable once constructed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PatientRecord", into = "PatientRecord")]
pub struct PatientInput {
    sex: Sex,
    age: u32,
    bmi: f64,
    height_cm: f64,
    waist_cm: f64,
    lipids: LipidPanel,
    hypertension: bool,
}

impl PatientInput {
    /// Validate and construct a patient
    ///
    /// # Errors
    /// Returns `InputError` when a biometric value is outside its accepted
    /// range. Lipids must be positive and within the unit's range.
    pub fn new(
        sex: Sex,
        age: u32,
        bmi: f64,
        height_cm: f64,
        waist_cm: f64,
        lipids: LipidPanel,
        hypertension: bool,
    ) -> Result<Self> {
        if !(AGE_RANGE.0..=AGE_RANGE.1).contains(&age) {
            return Err(InputError::OutOfRange {
                field: "age",
                value: f64::from(age),
                min: f64::from(AGE_RANGE.0),
                max: f64::from(AGE_RANGE.1),
            });
        }
        let bmi = ensure_range("bmi", bmi, BMI_RANGE.0, BMI_RANGE.1)?;
        let height_cm = ensure_range("height_cm", height_cm, HEIGHT_RANGE_CM.0, HEIGHT_RANGE_CM.1)?;
        let waist_cm = ensure_range("waist_cm", waist_cm, WAIST_RANGE_CM.0, WAIST_RANGE_CM.1)?;
        let (tg_min, tg_max) = lipids.unit.triglyceride_range();
        let (hdl_min, hdl_max) = lipids.unit.hdl_range();
        ensure_positive("triglycerides", lipids.triglycerides)?;
        ensure_range("triglycerides", lipids.triglycerides, tg_min, tg_max)?;
        ensure_positive("hdl", lipids.hdl)?;
        ensure_range("hdl", lipids.hdl, hdl_min, hdl_max)?;

        Ok(Self {
            sex,
            age,
            bmi,
            height_cm,
            waist_cm,
            lipids,
            hypertension,
        })
    }

    #[must_use]
    pub const fn sex(&self) -> Sex {
        self.sex
    }

    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    #[must_use]
    pub const fn bmi(&self) -> f64 {
        self.bmi
    }

    #[must_use]
    pub const fn height_cm(&self) -> f64 {
        self.height_cm
    }

    #[must_use]
    pub const fn waist_cm(&self) -> f64 {
        self.waist_cm
    }

    #[must_use]
    pub const fn lipids(&self) -> LipidPanel {
        self.lipids
    }

    #[must_use]
    pub const fn hypertension(&self) -> bool {
        self.hypertension
    }

    /// Stable content hash of every field, used to tell repeated submissions apart
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

// Floats hash by bit pattern; construction already rejects NaN.
impl Hash for PatientInput {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sex.hash(state);
        self.age.hash(state);
        self.bmi.to_bits().hash(state);
        self.height_cm.to_bits().hash(state);
        self.waist_cm.to_bits().hash(state);
        self.lipids.triglycerides.to_bits().hash(state);
        self.lipids.hdl.to_bits().hash(state);
        self.lipids.unit.hash(state);
        self.hypertension.hash(state);
    }
}

/// Hypertension as either a boolean or a 0/1 integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HypertensionFlag {
    Bool(bool),
    Int(i64),
}

impl Default for HypertensionFlag {
    fn default() -> Self {
        Self::Bool(false)
    }
}

impl HypertensionFlag {
    /// Interpret the flag, accepting only `true`/`false`/`0`/`1`
    pub fn to_bool(self) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(b),
            Self::Int(0) => Ok(false),
            Self::Int(1) => Ok(true),
            Self::Int(other) => Err(InputError::InvalidFlag(other)),
        }
    }
}

/// Unvalidated patient data as it arrives from a form or a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub sex: String,
    pub age: i64,
    pub bmi: f64,
    pub height_cm: f64,
    pub waist_cm: f64,
    pub triglycerides: f64,
    pub hdl: f64,
    #[serde(default)]
    pub lipid_unit: Option<String>,
    #[serde(default)]
    pub hypertension: HypertensionFlag,
}

impl TryFrom<PatientRecord> for PatientInput {
    type Error = InputError;

    fn try_from(record: PatientRecord) -> Result<Self> {
        Self::try_from(&record)
    }
}

impl TryFrom<&PatientRecord> for PatientInput {
    type Error = InputError;

    fn try_from(record: &PatientRecord) -> Result<Self> {
        let sex = record.sex.parse::<Sex>()?;
        let unit = match record.lipid_unit.as_deref() {
            Some(token) => token.parse::<LipidUnit>()?,
            None => LipidUnit::default(),
        };
        let age = u32::try_from(record.age).map_err(|_| InputError::OutOfRange {
            field: "age",
            // Lossy only for ages far beyond any accepted range
            value: record.age as f64,
            min: f64::from(AGE_RANGE.0),
            max: f64::from(AGE_RANGE.1),
        })?;

        Self::new(
            sex,
            age,
            record.bmi,
            record.height_cm,
            record.waist_cm,
            LipidPanel::new(record.triglycerides, record.hdl, unit),
            record.hypertension.to_bool()?,
        )
    }
}

impl From<PatientInput> for PatientRecord {
    fn from(patient: PatientInput) -> Self {
        Self {
            sex: patient.sex.as_str().to_string(),
            age: i64::from(patient.age),
            bmi: patient.bmi,
            height_cm: patient.height_cm,
            waist_cm: patient.waist_cm,
            triglycerides: patient.lipids.triglycerides,
            hdl: patient.lipids.hdl,
            lipid_unit: Some(patient.lipids.unit.as_str().to_string()),
            hypertension: HypertensionFlag::Bool(patient.hypertension),
        }
    }
}
