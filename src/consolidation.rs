//! Consolidation detector: incremental release or bulk migration.
//!
//! A release notes document that first appears carrying many versions is a
//! migration of historical entries, not a release. Only the current release
//! needs its cross-references checked in that case.

use crate::differ::VersionDiff;
use crate::domain::VersionTag;

/// Default number of added versions a newly introduced document may carry
/// before it counts as a consolidation.
pub const DEFAULT_CONSOLIDATION_THRESHOLD: usize = 3;

/// How a consolidation's validation scope was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsolidationScope {
    /// Narrowed to the current release from the metadata document
    CurrentRelease,
    /// Current release not among the added versions; all of them are checked
    Fallback,
}

/// Which versions to validate, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeDecision {
    Incremental {
        versions: Vec<VersionTag>,
    },
    Consolidation {
        versions: Vec<VersionTag>,
        scope: ConsolidationScope,
    },
}

impl ScopeDecision {
    /// Versions to validate, ascending
    pub fn versions(&self) -> &[VersionTag] {
        match self {
            ScopeDecision::Incremental { versions }
            | ScopeDecision::Consolidation { versions, .. } => versions,
        }
    }

    pub fn is_consolidation(&self) -> bool {
        matches!(self, ScopeDecision::Consolidation { .. })
    }
}

/// Whether a diff looks like a bulk consolidation rather than a release.
pub fn is_consolidation(diff: &VersionDiff, threshold: usize) -> bool {
    diff.introduced && diff.added.len() > threshold
}

/// Decide the validation scope for a diff.
///
/// `current_release` is only consulted for consolidations; callers may pass
/// `None` when [`is_consolidation`] is false.
pub fn decide_scope(
    diff: &VersionDiff,
    current_release: Option<&VersionTag>,
    threshold: usize,
) -> ScopeDecision {
    let all: Vec<VersionTag> = diff.added.iter().cloned().collect();

    if !is_consolidation(diff, threshold) {
        return ScopeDecision::Incremental { versions: all };
    }

    match current_release {
        Some(current) if diff.added.contains(current) => ScopeDecision::Consolidation {
            versions: vec![current.clone()],
            scope: ConsolidationScope::CurrentRelease,
        },
        _ => ScopeDecision::Consolidation {
            versions: all,
            scope: ConsolidationScope::Fallback,
        },
    }
}
