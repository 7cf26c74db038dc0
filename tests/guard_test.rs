// tests/guard_test.rs
use release_docs_guard::boundary::BoundaryWarning;
use release_docs_guard::cli::{run_guard, GuardContext, GuardOutcome};
use release_docs_guard::config::{Config, ReleaseLayout};
use release_docs_guard::domain::VersionTag;
use release_docs_guard::git::MockRepository;
use release_docs_guard::GuardError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NOTES: &str = "docs/releases/RELEASES.md";
const MATRIX: &str = "docs/releases/compatibility-matrix.md";

const BASE_NOTES: &str = "# Releases\n\n## [1.1.0] - 2025-12-01\n\n- fixes\n";
const HEAD_NOTES: &str =
    "# Releases\n\n## [1.2.0] - 2026-01-01\n\n- features\n\n## [1.1.0] - 2025-12-01\n\n- fixes\n";
const CONSOLIDATED_NOTES: &str = "# Releases\n\n\
## [1.2.0] - 2026-01-01\n\
## [1.1.0] - 2025-12-01\n\
## [1.0.0] - 2025-06-01\n\
## [0.10.0] - 2025-03-01\n\
## [0.9.0] - 2025-01-01\n";

fn write(root: &Path, rel: &str, content: &str) {
    let full = root.join(rel);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

/// Working tree with navigation in place and a matrix listing `matrix_versions`
fn docs_tree(notes: &str, matrix_versions: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, NOTES, notes);
    write(
        root,
        MATRIX,
        &matrix_versions
            .iter()
            .map(|v| format!("| {} | supported |\n", v))
            .collect::<String>(),
    );
    write(root, "docs/README.md", "- [Release notes](releases/RELEASES.md)\n");
    write(
        root,
        "docs/operations/runbook-index.md",
        "- [Release notes](../releases/RELEASES.md)\n",
    );
    dir
}

fn repo_with(base: Option<&str>, head: &str) -> MockRepository {
    let mut repo = MockRepository::new();
    repo.add_revision("base");
    if let Some(base) = base {
        repo.set_file("base", NOTES, base);
    }
    repo.set_file("head", NOTES, head);
    repo
}

fn pr() -> GuardContext {
    GuardContext::pull_request("base", "head")
}

#[test]
fn test_non_pull_request_skips_without_reads() {
    let ctx = GuardContext {
        event_name: "push".to_string(),
        base: None,
        head: None,
    };
    let root = PathBuf::from("/nonexistent/release-docs-guard-root");

    let report = run_guard(&ctx, &Config::default(), &root, || -> release_docs_guard::Result<MockRepository> {
        panic!("repository must not be opened outside pull requests")
    })
    .unwrap();

    assert_eq!(report.outcome, GuardOutcome::Skipped);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_missing_revisions_is_configuration_error() {
    let ctx = GuardContext {
        event_name: "pull_request".to_string(),
        base: Some("base".to_string()),
        head: None,
    };
    let dir = TempDir::new().unwrap();

    let err = run_guard(&ctx, &Config::default(), dir.path(), || {
        Ok(MockRepository::new())
    })
    .unwrap_err();

    assert!(matches!(err, GuardError::Configuration(_)));
}

#[test]
fn test_untouched_release_notes() {
    let dir = docs_tree(BASE_NOTES, &[]);
    let repo = repo_with(Some(BASE_NOTES), BASE_NOTES);

    let report = run_guard(&pr(), &Config::default(), dir.path(), || Ok(repo)).unwrap();
    assert_eq!(report.outcome, GuardOutcome::NoChange);
}

#[test]
fn test_incremental_release_passes() {
    let dir = docs_tree(HEAD_NOTES, &["1.1.0", "1.2.0"]);
    let repo = repo_with(Some(BASE_NOTES), HEAD_NOTES);

    let report = run_guard(&pr(), &Config::default(), dir.path(), || Ok(repo)).unwrap();
    assert_eq!(
        report.outcome,
        GuardOutcome::Passed {
            versions: vec![VersionTag::new(1, 2, 0)],
            consolidation: false,
        }
    );
}

#[test]
fn test_incremental_release_missing_from_matrix() {
    let dir = docs_tree(HEAD_NOTES, &["1.1.0"]);
    let repo = repo_with(Some(BASE_NOTES), HEAD_NOTES);

    let err = run_guard(&pr(), &Config::default(), dir.path(), || Ok(repo)).unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains(MATRIX), "got: {msg}");
    assert!(msg.contains("1.2.0"), "got: {msg}");
    match err.root_cause() {
        GuardError::MissingReference { path, needle } => {
            assert_eq!(path, Path::new(MATRIX));
            assert_eq!(needle, "1.2.0");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_body_only_change_reports_no_new_versions() {
    let edited = format!("{}\n- clarified wording\n", BASE_NOTES);
    let dir = docs_tree(&edited, &[]);
    let repo = repo_with(Some(BASE_NOTES), &edited);

    let report = run_guard(&pr(), &Config::default(), dir.path(), || Ok(repo)).unwrap();
    assert_eq!(report.outcome, GuardOutcome::NoNewVersions);
    assert_eq!(
        report.warnings,
        vec![BoundaryWarning::NoNewVersions {
            path: NOTES.to_string()
        }]
    );
}

#[test]
fn test_consolidation_validates_current_release_only() {
    // Only the current release is in the matrix; older entries are not checked.
    let dir = docs_tree(CONSOLIDATED_NOTES, &["1.2.0"]);
    write(dir.path(), "docs/metadata.json", r#"{"current_release": "v1.2.0"}"#);
    let repo = repo_with(None, CONSOLIDATED_NOTES);

    let report = run_guard(&pr(), &Config::default(), dir.path(), || Ok(repo)).unwrap();
    assert_eq!(
        report.outcome,
        GuardOutcome::Passed {
            versions: vec![VersionTag::new(1, 2, 0)],
            consolidation: true,
        }
    );
    assert!(report.warnings.is_empty());
}

#[test]
fn test_consolidation_fallback_validates_everything() {
    let dir = docs_tree(
        CONSOLIDATED_NOTES,
        &["0.9.0", "0.10.0", "1.0.0", "1.1.0", "1.2.0"],
    );
    write(dir.path(), "docs/metadata.json", r#"{"current_release": "v2.0.0"}"#);
    let repo = repo_with(None, CONSOLIDATED_NOTES);

    let report = run_guard(&pr(), &Config::default(), dir.path(), || Ok(repo)).unwrap();
    assert_eq!(
        report.outcome,
        GuardOutcome::Passed {
            versions: vec![
                VersionTag::new(0, 9, 0),
                VersionTag::new(0, 10, 0),
                VersionTag::new(1, 0, 0),
                VersionTag::new(1, 1, 0),
                VersionTag::new(1, 2, 0),
            ],
            consolidation: true,
        }
    );
    assert_eq!(
        report.warnings,
        vec![BoundaryWarning::ConsolidationFallback {
            current_release: "2.0.0".to_string(),
            added: 5,
        }]
    );
}

#[test]
fn test_unparseable_current_release_falls_back() {
    let dir = docs_tree(
        CONSOLIDATED_NOTES,
        &["0.9.0", "0.10.0", "1.0.0", "1.1.0", "1.2.0"],
    );
    write(dir.path(), "docs/metadata.json", r#"{"current_release": "latest"}"#);
    let repo = repo_with(None, CONSOLIDATED_NOTES);

    let report = run_guard(&pr(), &Config::default(), dir.path(), || Ok(repo)).unwrap();
    match report.outcome {
        GuardOutcome::Passed {
            versions,
            consolidation,
        } => {
            assert!(consolidation);
            assert_eq!(versions.len(), 5);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(
        report.warnings,
        vec![BoundaryWarning::ConsolidationFallback {
            current_release: "latest".to_string(),
            added: 5,
        }]
    );
}

#[test]
fn test_consolidation_fallback_fails_on_first_gap() {
    let dir = docs_tree(CONSOLIDATED_NOTES, &["1.2.0"]);
    write(dir.path(), "docs/metadata.json", r#"{"current_release": "v2.0.0"}"#);
    let repo = repo_with(None, CONSOLIDATED_NOTES);

    let err = run_guard(&pr(), &Config::default(), dir.path(), || Ok(repo)).unwrap_err();
    assert!(matches!(
        err,
        GuardError::ReleaseValidation { ref version, .. } if version == "0.9.0"
    ));
}

#[test]
fn test_consolidation_requires_metadata() {
    let dir = docs_tree(CONSOLIDATED_NOTES, &["1.2.0"]);
    let repo = repo_with(None, CONSOLIDATED_NOTES);

    let err = run_guard(&pr(), &Config::default(), dir.path(), || Ok(repo)).unwrap_err();
    assert!(matches!(err, GuardError::MissingFile(ref p) if p.ends_with("docs/metadata.json")));
}

#[test]
fn test_small_new_document_is_incremental() {
    let notes = "## [0.2.0] - 2025-02-01\n## [0.1.0] - 2025-01-01\n";
    let dir = docs_tree(notes, &["0.1.0", "0.2.0"]);
    let repo = repo_with(None, notes);

    let report = run_guard(&pr(), &Config::default(), dir.path(), || Ok(repo)).unwrap();
    assert_eq!(
        report.outcome,
        GuardOutcome::Passed {
            versions: vec![VersionTag::new(0, 1, 0), VersionTag::new(0, 2, 0)],
            consolidation: false,
        }
    );
}

#[test]
fn test_custom_threshold() {
    let notes = "## [0.2.0] - 2025-02-01\n## [0.1.0] - 2025-01-01\n";
    let dir = docs_tree(notes, &["0.2.0"]);
    write(dir.path(), "docs/metadata.json", r#"{"current_release": "0.2.0"}"#);
    let repo = repo_with(None, notes);

    let mut config = Config::default();
    config.guard.consolidation_threshold = 1;

    let report = run_guard(&pr(), &config, dir.path(), || Ok(repo)).unwrap();
    assert_eq!(
        report.outcome,
        GuardOutcome::Passed {
            versions: vec![VersionTag::new(0, 2, 0)],
            consolidation: true,
        }
    );
}

#[test]
fn test_unknown_revision_is_fatal() {
    let dir = docs_tree(HEAD_NOTES, &["1.2.0"]);
    let repo = repo_with(Some(BASE_NOTES), HEAD_NOTES);
    let ctx = GuardContext::pull_request("base", "missing-head");

    let err = run_guard(&ctx, &Config::default(), dir.path(), || Ok(repo)).unwrap_err();
    assert!(matches!(err, GuardError::Git(_)));
}

fn per_file_config() -> Config {
    let mut config = Config::default();
    config.guard.layout = ReleaseLayout::PerFile;
    config
}

fn per_file_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "docs/releases/v1.2.0.md",
        "[Upgrade](v1.2.0-upgrade.md) / [Matrix](compatibility-matrix.md)\n",
    );
    write(root, "docs/releases/v1.2.0-upgrade.md", "# Upgrade\n");
    write(root, MATRIX, "| v1.2.0 | supported |\n");
    write(
        root,
        "docs/README.md",
        "[v1.2.0](releases/v1.2.0.md) [upgrade](releases/v1.2.0-upgrade.md)\n",
    );
    write(
        root,
        "docs/operations/runbook-index.md",
        "[v1.2.0](../releases/v1.2.0.md) [upgrade](../releases/v1.2.0-upgrade.md)\n",
    );
    dir
}

#[test]
fn test_per_file_layout_validates_added_release_files() {
    let dir = per_file_tree();
    let mut repo = MockRepository::new();
    repo.set_file("base", "README.md", "readme");
    repo.set_file("head", "README.md", "readme");
    repo.set_file("head", "docs/releases/v1.2.0.md", "notes");
    repo.set_file("head", "docs/releases/v1.2.0-upgrade.md", "upgrade");
    repo.set_file("head", "docs/guides/v9.9.9.md", "not a release file");

    let report = run_guard(&pr(), &per_file_config(), dir.path(), || Ok(repo)).unwrap();
    assert_eq!(
        report.outcome,
        GuardOutcome::Passed {
            versions: vec![VersionTag::new(1, 2, 0)],
            consolidation: false,
        }
    );
}

#[test]
fn test_per_file_layout_without_new_files() {
    let dir = per_file_tree();
    let mut repo = MockRepository::new();
    repo.set_file("base", "docs/releases/v1.2.0.md", "notes");
    repo.set_file("head", "docs/releases/v1.2.0.md", "edited notes");

    let report = run_guard(&pr(), &per_file_config(), dir.path(), || Ok(repo)).unwrap();
    assert_eq!(report.outcome, GuardOutcome::NoNewVersions);
}

#[test]
fn test_per_file_layout_missing_upgrade_guide() {
    let dir = per_file_tree();
    fs::remove_file(dir.path().join("docs/releases/v1.2.0-upgrade.md")).unwrap();
    let mut repo = MockRepository::new();
    repo.add_revision("base");
    repo.set_file("head", "docs/releases/v1.2.0.md", "notes");

    let err = run_guard(&pr(), &per_file_config(), dir.path(), || Ok(repo)).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        GuardError::MissingFile(p) if p == Path::new("docs/releases/v1.2.0-upgrade.md")
    ));
}
