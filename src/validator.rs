//! Cross-reference validator.
//!
//! Every release that a change introduces must be reachable from the docs
//! navigation and listed in the compatibility matrix. Checks stop at the
//! first missing reference.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::{PathsConfig, ReleaseLayout};
use crate::domain::VersionTag;
use crate::error::{GuardError, Result};

/// Link from the directory of `from_doc` to `target`, both relative to the
/// same root, using `/` separators.
///
/// `relative_link("docs/operations/runbook-index.md", "docs/releases/RELEASES.md")`
/// is `../releases/RELEASES.md`.
pub fn relative_link(from_doc: &Path, target: &Path) -> String {
    let from_dir: Vec<Component> = from_doc
        .parent()
        .map(|dir| dir.components().collect())
        .unwrap_or_default();
    let target: Vec<Component> = target.components().collect();

    let common = from_dir
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = std::iter::repeat("..".to_string()).take(from_dir.len() - common);
    let downs = target[common..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned());

    ups.chain(downs).collect::<Vec<_>>().join("/")
}

/// Checks a working tree's docs against the releases a change introduces
pub struct CrossReferenceValidator<'a> {
    root: &'a Path,
    paths: &'a PathsConfig,
}

impl<'a> CrossReferenceValidator<'a> {
    pub fn new(root: &'a Path, paths: &'a PathsConfig) -> Self {
        CrossReferenceValidator { root, paths }
    }

    /// Validate each version in order, stopping at the first failure.
    ///
    /// The returned error is a [`GuardError::ReleaseValidation`] naming the
    /// version that failed.
    pub fn validate_all(&self, versions: &[VersionTag], layout: ReleaseLayout) -> Result<()> {
        for version in versions {
            let result = match layout {
                ReleaseLayout::Consolidated => self.validate_release(version),
                ReleaseLayout::PerFile => self.validate_release_file(version),
            };
            result.map_err(|e| e.for_release(version))?;
            tracing::info!(%version, "release cross-references validated");
        }
        Ok(())
    }

    /// Cross-references for one version in the consolidated layout
    pub fn validate_release(&self, version: &VersionTag) -> Result<()> {
        let notes = &self.paths.release_notes;

        self.require_contains(notes, &version.bracketed())?;
        self.require_contains(&self.paths.compatibility_matrix, &version.to_string())?;
        self.require_contains(
            &self.paths.docs_index,
            &relative_link(&self.paths.docs_index, notes),
        )?;
        self.require_contains(
            &self.paths.runbook_index,
            &relative_link(&self.paths.runbook_index, notes),
        )?;

        Ok(())
    }

    /// Cross-references for one version in the per-file layout
    pub fn validate_release_file(&self, version: &VersionTag) -> Result<()> {
        let release = self.release_file(version);
        let upgrade = self.upgrade_guide(version);

        for required in [&release, &upgrade] {
            if !self.root.join(required).is_file() {
                return Err(GuardError::MissingFile(required.clone()));
            }
        }

        self.require_contains(&release, &relative_link(&release, &upgrade))?;
        self.require_contains(
            &release,
            &relative_link(&release, &self.paths.compatibility_matrix),
        )?;
        self.require_contains(&self.paths.compatibility_matrix, &version.prefixed())?;

        for index in [&self.paths.docs_index, &self.paths.runbook_index] {
            self.require_contains(index, &relative_link(index, &release))?;
            self.require_contains(index, &relative_link(index, &upgrade))?;
        }

        Ok(())
    }

    fn release_file(&self, version: &VersionTag) -> PathBuf {
        self.paths
            .releases_dir
            .join(format!("{}.md", version.prefixed()))
    }

    fn upgrade_guide(&self, version: &VersionTag) -> PathBuf {
        self.paths
            .releases_dir
            .join(format!("{}-upgrade.md", version.prefixed()))
    }

    fn read(&self, rel: &Path) -> Result<String> {
        let full = self.root.join(rel);
        if !full.is_file() {
            return Err(GuardError::MissingFile(rel.to_path_buf()));
        }
        Ok(fs::read_to_string(full)?)
    }

    fn require_contains(&self, rel: &Path, needle: &str) -> Result<()> {
        let content = self.read(rel)?;
        if !content.contains(needle) {
            return Err(GuardError::missing_reference(rel, needle));
        }
        tracing::debug!(path = %rel.display(), needle, "reference found");
        Ok(())
    }
}
