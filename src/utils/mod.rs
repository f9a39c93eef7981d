//! Utility functions shared by the library and the command-line front end
//!
//! This module provides number formatting for result panels and the
//! standardized logging and progress helpers.

pub mod format;
pub mod logging;

pub use format::format_number;
pub use logging::{init_logging, log_operation_complete, log_operation_start, log_warning};
