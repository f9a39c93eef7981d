//! Risk categories for FOSSI scores
//!
//! Women are stratified into four bands and men into two. Each band has a
//! fixed severity rank and a fixed clinical explanation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::patient::Sex;
use crate::utils::format::format_number;

/// Female cut-offs: Low | Intermediate | High | Very High
pub const FEMALE_CUTOFFS: [f64; 3] = [5.84, 7.88, 9.58];

/// Male cut-off: Grey zone | High/Very High
pub const MALE_CUTOFFS: [f64; 1] = [0.71];

/// Discrete FOSSI risk categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    /// Female, score below 5.84
    Low,
    /// Female, 5.84 up to and including 7.88
    Intermediate,
    /// Female, above 7.88 up to and including 9.58
    High,
    /// Female, above 9.58
    VeryHigh,
    /// Male, score below 0.71
    GreyZone,
    /// Male, 0.71 and above
    HighOrVeryHigh,
}

impl RiskCategory {
    /// Ordinal within the sex's category set, 0 being the lowest risk
    #[must_use]
    pub const fn severity_rank(self) -> u8 {
        match self {
            Self::Low | Self::GreyZone => 0,
            Self::Intermediate | Self::HighOrVeryHigh => 1,
            Self::High => 2,
            Self::VeryHigh => 3,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Intermediate => "Intermediate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::GreyZone => "Grey zone (<0.71)",
            Self::HighOrVeryHigh => "High/Very High (≥0.71)",
        }
    }

    /// Fixed clinical interpretation of the category
    #[must_use]
    pub const fn explanation(self) -> &'static str {
        match self {
            Self::Low => "Metabolically quiescent; FO prevalence ~12%.",
            Self::Intermediate => "Early metabolic priming; bone status variable.",
            Self::High => "High-risk metabolic footprint; trabecular damage likely.",
            Self::VeryHigh => {
                "Near-certain FO; severe metabolic burden; trabecular deterioration."
            }
            Self::GreyZone => "Baseline FO prevalence ~17%; monitor closely.",
            Self::HighOrVeryHigh => {
                "Full FO phenotype; pronounced metabolic overload and trabecular decline."
            }
        }
    }

    /// Sex this category belongs to
    #[must_use]
    pub const fn sex(self) -> Sex {
        match self {
            Self::Low | Self::Intermediate | Self::High | Self::VeryHigh => Sex::Female,
            Self::GreyZone | Self::HighOrVeryHigh => Sex::Male,
        }
    }

    /// All categories for `sex`, lowest risk first
    #[must_use]
    pub const fn for_sex(sex: Sex) -> &'static [Self] {
        match sex {
            Sex::Female => &[Self::Low, Self::Intermediate, Self::High, Self::VeryHigh],
            Sex::Male => &[Self::GreyZone, Self::HighOrVeryHigh],
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of classifying a single FOSSI score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub score: f64,
    pub category: RiskCategory,
    pub severity_rank: u8,
    pub explanation: String,
}

impl RiskResult {
    #[must_use]
    pub fn new(score: f64, category: RiskCategory) -> Self {
        Self {
            score,
            category,
            severity_rank: category.severity_rank(),
            explanation: category.explanation().to_string(),
        }
    }
}

impl fmt::Display for RiskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FOSSI value: {} | Risk category: {}",
            format_number(self.score, 2),
            self.category
        )
    }
}

/// Category for a score under the female bands
///
/// 7.88 itself is Intermediate and 9.58 itself is High.
#[must_use]
pub fn female_category(score: f64) -> RiskCategory {
    let [low, intermediate, high] = FEMALE_CUTOFFS;
    if score < low {
        RiskCategory::Low
    } else if score <= intermediate {
        RiskCategory::Intermediate
    } else if score <= high {
        RiskCategory::High
    } else {
        RiskCategory::VeryHigh
    }
}

/// Category for a score under the male band; 0.71 itself is high
#[must_use]
pub fn male_category(score: f64) -> RiskCategory {
    if score < MALE_CUTOFFS[0] {
        RiskCategory::GreyZone
    } else {
        RiskCategory::HighOrVeryHigh
    }
}

/// Classify a FOSSI score with the bands for `sex`
#[must_use]
pub fn classify(sex: Sex, score: f64) -> RiskResult {
    let category = match sex {
        Sex::Female => female_category(score),
        Sex::Male => male_category(score),
    };
    RiskResult::new(score, category)
}
