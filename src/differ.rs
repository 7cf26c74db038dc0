//! Version-set differ: which release versions a change introduces

use std::collections::BTreeSet;

use crate::domain::{release_versions, VersionTag};

/// Versions added between the base and head revisions of the release notes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionDiff {
    /// `head_versions - base_versions`
    pub added: BTreeSet<VersionTag>,
    /// The release notes did not exist at the base revision
    pub introduced: bool,
}

impl VersionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
    }
}

/// Compute the versions declared in `head` that are not declared in `base`.
///
/// A missing `base` means the document is being introduced by this change:
/// the base set is empty and [`VersionDiff::introduced`] is set.
pub fn diff_versions(base: Option<&str>, head: &str) -> VersionDiff {
    let base_versions = base.map(release_versions).unwrap_or_default();
    let head_versions = release_versions(head);

    VersionDiff {
        added: head_versions.difference(&base_versions).cloned().collect(),
        introduced: base.is_none(),
    }
}
