//! Lipid unit normalization
//!
//! All downstream formulas expect triglycerides and HDL cholesterol in mmol/L.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_positive};
use crate::models::patient::{LipidPanel, LipidUnit};

/// mg/dL per mmol/L for triglycerides
pub const TG_MG_DL_PER_MMOL: f64 = 88.57;

/// mg/dL per mmol/L for HDL cholesterol
pub const HDL_MG_DL_PER_MMOL: f64 = 38.67;

/// Triglyceride and HDL values expressed in mmol/L
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLipids {
    pub tg_mmol: f64,
    pub hdl_mmol: f64,
}

/// Convert lipid values to mmol/L
///
/// # Errors
/// Returns `InputError` if either value is not strictly positive.
pub fn normalize(tg: f64, hdl: f64, unit: LipidUnit) -> Result<NormalizedLipids> {
    let tg = ensure_positive("triglycerides", tg)?;
    let hdl = ensure_positive("hdl", hdl)?;

    let normalized = match unit {
        LipidUnit::MmolPerL => NormalizedLipids {
            tg_mmol: tg,
            hdl_mmol: hdl,
        },
        LipidUnit::MgPerDl => NormalizedLipids {
            tg_mmol: tg / TG_MG_DL_PER_MMOL,
            hdl_mmol: hdl / HDL_MG_DL_PER_MMOL,
        },
    };
    Ok(normalized)
}

/// Normalize a whole lipid panel
pub fn normalize_panel(panel: &LipidPanel) -> Result<NormalizedLipids> {
    normalize(panel.triglycerides, panel.hdl, panel.unit)
}
