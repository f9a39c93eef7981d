//! Domain models for FOSSI scoring
//!
//! This module contains the patient-facing input types. Derived values and
//! results live next to the algorithm stages that produce them.

pub mod patient;

pub use patient::{HypertensionFlag, LipidPanel, LipidUnit, PatientInput, PatientRecord, Sex};
