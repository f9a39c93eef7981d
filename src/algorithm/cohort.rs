//! Cohort evaluation
//!
//! Scores many patient records at once. Records are independent, so they are
//! evaluated on the rayon pool; output order always matches input order.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Instant;

use indicatif::ProgressBar;
use itertools::Itertools;
use rayon::prelude::*;
use serde::Serialize;

use crate::algorithm::fossi::category::RiskCategory;
use crate::algorithm::fossi::evaluate_with;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::patient::{PatientInput, PatientRecord, Sex};
use crate::utils::format::format_number;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Compact per-patient outcome of a cohort run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortRow {
    pub sex: Sex,
    pub score: f64,
    pub category: RiskCategory,
    pub severity_rank: u8,
    /// Probability read off the curve at the patient's score
    pub probability: f64,
}

/// Outcome for one input record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortOutcome {
    /// Position of the record in the input
    pub index: usize,
    #[serde(flatten)]
    pub result: CohortResult,
}

/// Either a scored row or the reason the record was rejected
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortResult {
    Scored(CohortRow),
    Rejected(String),
}

/// Aggregate counts over a cohort run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CohortSummary {
    pub evaluated: usize,
    pub rejected: usize,
    /// Number of patients per category label
    pub by_category: BTreeMap<String, usize>,
    /// Mean score per sex; absent when no patient of that sex was scored
    pub mean_score: BTreeMap<Sex, f64>,
}

impl CohortSummary {
    fn from_outcomes(outcomes: &[CohortOutcome]) -> Self {
        let rows: Vec<&CohortRow> = outcomes
            .iter()
            .filter_map(|o| match &o.result {
                CohortResult::Scored(row) => Some(row),
                CohortResult::Rejected(_) => None,
            })
            .collect();

        let by_category = rows
            .iter()
            .map(|row| row.category.label().to_string())
            .counts()
            .into_iter()
            .collect();

        let mean_score = rows
            .iter()
            .into_group_map_by(|row| row.sex)
            .into_iter()
            .map(|(sex, group)| {
                let total: f64 = group.iter().map(|row| row.score).sum();
                (sex, total / group.len() as f64)
            })
            .collect();

        Self {
            evaluated: rows.len(),
            rejected: outcomes.len() - rows.len(),
            by_category,
            mean_score,
        }
    }

    /// Human-readable summary
    #[must_use]
    pub fn render(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Cohort Summary:\n");
        let _ = writeln!(summary, "  Evaluated: {}", self.evaluated);
        let _ = writeln!(summary, "  Rejected: {}", self.rejected);
        if !self.by_category.is_empty() {
            summary.push_str("  By category:\n");
            for (label, count) in &self.by_category {
                let _ = writeln!(summary, "    {label}: {count}");
            }
        }
        for (sex, mean) in &self.mean_score {
            let _ = writeln!(summary, "  Mean FOSSI ({sex}): {}", format_number(*mean, 2));
        }
        summary
    }
}

/// Per-record outcomes plus their summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortReport {
    pub outcomes: Vec<CohortOutcome>,
    pub summary: CohortSummary,
}

fn evaluate_record(record: &PatientRecord, config: &EngineConfig) -> Result<CohortRow> {
    let patient = PatientInput::try_from(record)?;
    let assessment = evaluate_with(&patient, config)?;
    let probability = assessment
        .curve
        .patient()
        .map_or(f64::NAN, |point| point.probability);

    Ok(CohortRow {
        sex: patient.sex(),
        score: assessment.risk.score,
        category: assessment.risk.category,
        severity_rank: assessment.risk.severity_rank,
        probability,
    })
}

fn run_cohort(
    records: &[PatientRecord],
    config: &EngineConfig,
    progress: Option<&ProgressBar>,
) -> Result<CohortReport> {
    config.validate()?;
    let start = Instant::now();
    log_operation_start("Scoring cohort of", &format!("{} records", records.len()));

    let outcomes: Vec<CohortOutcome> = records
        .par_iter()
        .enumerate()
        .map(|(index, record)| {
            let result = match evaluate_record(record, config) {
                Ok(row) => CohortResult::Scored(row),
                Err(e) => {
                    log_warning(&format!("Rejected record {index}: {e}"), None);
                    CohortResult::Rejected(e.to_string())
                }
            };
            if let Some(pb) = progress {
                pb.inc(1);
            }
            CohortOutcome { index, result }
        })
        .collect();

    let summary = CohortSummary::from_outcomes(&outcomes);
    log_operation_complete("scored", "cohort records", summary.evaluated, Some(start.elapsed()));

    Ok(CohortReport { outcomes, summary })
}

/// Score every record; invalid records are reported, not fatal
///
/// # Errors
/// Fails only if `config` itself is invalid.
pub fn evaluate_cohort(records: &[PatientRecord], config: &EngineConfig) -> Result<CohortReport> {
    run_cohort(records, config, None)
}

/// Same as [`evaluate_cohort`], advancing `progress` once per record
pub fn evaluate_cohort_with_progress(
    records: &[PatientRecord],
    config: &EngineConfig,
    progress: &ProgressBar,
) -> Result<CohortReport> {
    run_cohort(records, config, Some(progress))
}

/// Category counts for a set of scored rows, in severity order
#[must_use]
pub fn category_counts(rows: &[CohortRow], sex: Sex) -> Vec<(RiskCategory, usize)> {
    RiskCategory::for_sex(sex)
        .iter()
        .map(|&category| {
            let count = rows.iter().filter(|row| row.category == category).count();
            (category, count)
        })
        .collect()
}

impl CohortReport {
    /// Successfully scored rows, in input order
    #[must_use]
    pub fn rows(&self) -> Vec<CohortRow> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.result {
                CohortResult::Scored(row) => Some(row.clone()),
                CohortResult::Rejected(_) => None,
            })
            .collect()
    }

    /// First rejection, if any record failed validation
    #[must_use]
    pub fn first_rejection(&self) -> Option<(usize, &str)> {
        self.outcomes.iter().find_map(|o| match &o.result {
            CohortResult::Rejected(reason) => Some((o.index, reason.as_str())),
            CohortResult::Scored(_) => None,
        })
    }
}
