//! Pure formatting functions for UI output.
//!
//! Status lines go to stdout, errors and warnings to stderr. Styling comes
//! from `console`, which drops colors when the stream is not a terminal.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::GuardOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the final status line of a guard run.
///
/// Passing runs get a checkmark; skips and no-ops are plain status lines.
pub fn display_outcome(outcome: &GuardOutcome) {
    match outcome {
        GuardOutcome::Passed { .. } => display_success(&outcome.to_string()),
        _ => display_status(&outcome.to_string()),
    }
}
