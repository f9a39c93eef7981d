//! A Rust library for computing the Fast Ossifier Stratification Index
//! (FOSSI), classifying it into sex-specific risk bands, and sampling the
//! probability curves used to visualise the result.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod usage;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{CurveConfig, EngineConfig};
pub use error::{InputError, Result};
pub use models::{LipidPanel, LipidUnit, PatientInput, PatientRecord, Sex};

// Scoring pipeline
pub use algorithm::fossi::category::{RiskCategory, RiskResult, classify};
pub use algorithm::fossi::curve::{Curve, CurvePoint, build_curve, build_curve_with, interpolate};
pub use algorithm::fossi::indices::{DerivedIndices, compute_indices};
pub use algorithm::fossi::score::score;
pub use algorithm::fossi::units::{NormalizedLipids, normalize};
pub use algorithm::fossi::{Assessment, evaluate, evaluate_with};

// Cohort evaluation
pub use algorithm::cohort::{CohortReport, CohortRow, CohortSummary, evaluate_cohort};

// Usage tracking
pub use usage::{MemoryUsageSink, UsageEvent, UsageSink, UsageTracker};
