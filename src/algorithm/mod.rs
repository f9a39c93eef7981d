//! Algorithm implementations for FOSSI risk stratification
//!
//! This module contains the single-patient scoring pipeline and the
//! cohort evaluator built on top of it.

pub mod cohort;
pub mod fossi;
