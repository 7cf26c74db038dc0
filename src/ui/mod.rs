//! User interface module - status reporting for guard runs.

use crate::cli::GuardReport;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_outcome, display_status, display_success,
};

/// Print a guard report: warnings first, then the status line.
pub fn display_report(report: &GuardReport) {
    for warning in &report.warnings {
        display_boundary_warning(warning);
    }
    display_outcome(&report.outcome);
}
