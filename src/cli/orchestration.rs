//! Guard workflow orchestration
//!
//! Runs the release docs guard as a small state machine:
//! skipped outside pull requests, a no-op when the release notes are
//! untouched, otherwise diff, scope and validate. Everything the workflow
//! needs arrives through [GuardContext] and [Config]; nothing here reads the
//! process environment.

use std::collections::BTreeSet;
use std::env;
use std::fmt;
use std::path::Path;

use crate::boundary::BoundaryWarning;
use crate::config::{Config, ReleaseLayout};
use crate::consolidation::{decide_scope, is_consolidation, ConsolidationScope, ScopeDecision};
use crate::differ::diff_versions;
use crate::domain::VersionTag;
use crate::error::{GuardError, Result};
use crate::git::RevisionSource;
use crate::metadata::DocsMetadata;
use crate::validator::CrossReferenceValidator;

/// Event name that marks a pull request run
pub const PULL_REQUEST_EVENT: &str = "pull_request";

pub const EVENT_NAME_VAR: &str = "GITHUB_EVENT_NAME";
pub const BASE_REVISION_VAR: &str = "PR_BASE_SHA";
pub const HEAD_REVISION_VAR: &str = "PR_HEAD_SHA";

/// Invocation context for the guard
///
/// Built once at startup from the CI environment and CLI overrides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuardContext {
    /// CI event that triggered the run (e.g. "pull_request", "push")
    pub event_name: String,

    /// Base revision of the pull request
    pub base: Option<String>,

    /// Head revision of the pull request
    pub head: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl GuardContext {
    /// A pull request context with both revisions set
    pub fn pull_request(base: impl Into<String>, head: impl Into<String>) -> Self {
        GuardContext {
            event_name: PULL_REQUEST_EVENT.to_string(),
            base: Some(base.into()),
            head: Some(head.into()),
        }
    }

    /// Read `GITHUB_EVENT_NAME`, `PR_BASE_SHA` and `PR_HEAD_SHA`
    pub fn from_env() -> Self {
        GuardContext {
            event_name: env::var(EVENT_NAME_VAR).unwrap_or_default().trim().to_string(),
            base: non_empty(env::var(BASE_REVISION_VAR).ok()),
            head: non_empty(env::var(HEAD_REVISION_VAR).ok()),
        }
    }

    /// Replace fields with explicitly given values
    pub fn with_overrides(
        mut self,
        event_name: Option<String>,
        base: Option<String>,
        head: Option<String>,
    ) -> Self {
        if let Some(event_name) = event_name {
            self.event_name = event_name.trim().to_string();
        }
        if let Some(base) = non_empty(base) {
            self.base = Some(base);
        }
        if let Some(head) = non_empty(head) {
            self.head = Some(head);
        }
        self
    }

    pub fn is_pull_request(&self) -> bool {
        self.event_name == PULL_REQUEST_EVENT
    }

    /// Base and head revisions, both required
    pub fn revisions(&self) -> Result<(&str, &str)> {
        match (self.base.as_deref(), self.head.as_deref()) {
            (Some(base), Some(head)) => Ok((base, head)),
            _ => Err(GuardError::configuration(format!(
                "{} and {} must be set for release docs guard",
                BASE_REVISION_VAR, HEAD_REVISION_VAR
            ))),
        }
    }
}

/// Terminal state of a guard run that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Not a pull request; nothing was read
    Skipped,
    /// Release notes identical at base and head
    NoChange,
    /// Release notes changed, or files were added, without new releases
    NoNewVersions,
    /// Every version in scope has its cross-references
    Passed {
        versions: Vec<VersionTag>,
        consolidation: bool,
    },
}

impl fmt::Display for GuardOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardOutcome::Skipped => write!(f, "release docs guard skipped (non-PR)"),
            GuardOutcome::NoChange => {
                write!(f, "release docs guard passed (release notes unchanged)")
            }
            GuardOutcome::NoNewVersions => {
                write!(f, "release docs guard passed (no new release versions)")
            }
            GuardOutcome::Passed {
                versions,
                consolidation,
            } => {
                let list = versions
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                if *consolidation {
                    write!(f, "release docs guard passed (consolidation: {})", list)
                } else {
                    write!(f, "release docs guard passed ({})", list)
                }
            }
        }
    }
}

/// Result of a successful guard run
#[derive(Debug, Clone, PartialEq)]
pub struct GuardReport {
    pub outcome: GuardOutcome,

    /// Non-fatal conditions to show the user
    pub warnings: Vec<BoundaryWarning>,
}

impl GuardReport {
    fn new(outcome: GuardOutcome) -> Self {
        GuardReport {
            outcome,
            warnings: Vec::new(),
        }
    }
}

/// Main guard workflow
///
/// 1. Skip outside pull requests, before touching the repository
/// 2. Resolve base and head revisions
/// 3. Find the release versions the change introduces
/// 4. Decide the validation scope
/// 5. Validate cross-references in the working tree under `root`
///
/// # Arguments
///
/// * `ctx` - Invocation context
/// * `config` - Guard configuration
/// * `root` - Working tree the documentation paths are relative to, used
///   when the revision source has no working directory of its own
/// * `open_repo` - Opens the revision source; only called for pull requests
///
/// # Returns
///
/// The report for a passing run, or the first error encountered
pub fn run_guard<R, F>(
    ctx: &GuardContext,
    config: &Config,
    root: &Path,
    open_repo: F,
) -> Result<GuardReport>
where
    R: RevisionSource,
    F: FnOnce() -> Result<R>,
{
    if !ctx.is_pull_request() {
        tracing::info!(event = %ctx.event_name, "not a pull request, skipping");
        return Ok(GuardReport::new(GuardOutcome::Skipped));
    }

    let (base, head) = ctx.revisions()?;
    let repo = open_repo()?;
    let root = repo.workdir().unwrap_or(root);
    tracing::debug!(base, head, root = %root.display(), layout = ?config.guard.layout, "running release docs guard");

    match config.guard.layout {
        ReleaseLayout::Consolidated => run_consolidated(&repo, base, head, config, root),
        ReleaseLayout::PerFile => run_per_file(&repo, base, head, config, root),
    }
}

fn run_consolidated<R: RevisionSource>(
    repo: &R,
    base: &str,
    head: &str,
    config: &Config,
    root: &Path,
) -> Result<GuardReport> {
    let notes = &config.paths.release_notes;

    let base_doc = repo.read_file_at(base, notes)?;
    let head_doc = repo.read_file_at(head, notes)?;

    if base_doc == head_doc {
        tracing::info!(path = %notes.display(), "release notes unchanged");
        return Ok(GuardReport::new(GuardOutcome::NoChange));
    }

    let diff = diff_versions(base_doc.as_deref(), head_doc.as_deref().unwrap_or_default());
    if diff.is_empty() {
        let mut report = GuardReport::new(GuardOutcome::NoNewVersions);
        report.warnings.push(BoundaryWarning::NoNewVersions {
            path: notes.display().to_string(),
        });
        return Ok(report);
    }

    let threshold = config.guard.consolidation_threshold;
    // Raw metadata value is kept for the warning when it is not a version.
    let (current_raw, current_release) = if is_consolidation(&diff, threshold) {
        let metadata = DocsMetadata::load(&root.join(&config.paths.metadata))?;
        let parsed = metadata.current_release();
        if let Err(e) = &parsed {
            tracing::info!(error = %e, "metadata current release unusable");
        }
        (metadata.current_release, parsed.ok())
    } else {
        (String::new(), None)
    };

    let decision = decide_scope(&diff, current_release.as_ref(), threshold);
    tracing::info!(
        added = diff.added.len(),
        introduced = diff.introduced,
        consolidation = decision.is_consolidation(),
        in_scope = decision.versions().len(),
        "validation scope decided"
    );

    let mut warnings = Vec::new();
    if let ScopeDecision::Consolidation {
        scope: ConsolidationScope::Fallback,
        ..
    } = &decision
    {
        let current = current_release
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or(current_raw);
        tracing::info!(
            current_release = %current,
            added = diff.added.len(),
            "current release not among added versions, validating all"
        );
        warnings.push(BoundaryWarning::ConsolidationFallback {
            current_release: current,
            added: diff.added.len(),
        });
    }

    CrossReferenceValidator::new(root, &config.paths)
        .validate_all(decision.versions(), ReleaseLayout::Consolidated)?;

    Ok(GuardReport {
        outcome: GuardOutcome::Passed {
            versions: decision.versions().to_vec(),
            consolidation: decision.is_consolidation(),
        },
        warnings,
    })
}

fn run_per_file<R: RevisionSource>(
    repo: &R,
    base: &str,
    head: &str,
    config: &Config,
    root: &Path,
) -> Result<GuardReport> {
    let releases_dir = &config.paths.releases_dir;

    let versions: BTreeSet<VersionTag> = repo
        .added_files(base, head)?
        .iter()
        .filter(|path| path.parent() == Some(releases_dir.as_path()))
        .filter_map(|path| VersionTag::from_release_file(path))
        .collect();

    if versions.is_empty() {
        tracing::info!(dir = %releases_dir.display(), "no new release note files");
        return Ok(GuardReport::new(GuardOutcome::NoNewVersions));
    }

    let versions: Vec<VersionTag> = versions.into_iter().collect();
    CrossReferenceValidator::new(root, &config.paths)
        .validate_all(&versions, ReleaseLayout::PerFile)?;

    Ok(GuardReport::new(GuardOutcome::Passed {
        versions,
        consolidation: false,
    }))
}
