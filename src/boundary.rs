use std::fmt;

/// Non-fatal conditions met while scoping release validation.
/// These are reported to the user but never fail the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Bulk consolidation whose current release is not among the added versions
    ConsolidationFallback {
        current_release: String,
        added: usize,
    },
    /// Release notes changed but no new release headings were found
    NoNewVersions { path: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::ConsolidationFallback {
                current_release,
                added,
            } => {
                write!(
                    f,
                    "Consolidation detected but current release '{}' is not among the {} added versions; validating all of them",
                    current_release, added
                )
            }
            BoundaryWarning::NoNewVersions { path } => {
                write!(f, "'{}' changed without adding release headings", path)
            }
        }
    }
}
