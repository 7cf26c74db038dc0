use crate::error::{GuardError, Result};
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

/// Release version as it appears in release notes headings (`X.Y.Z`)
///
/// Ordering follows semver precedence, so `1.10.0` sorts after `1.9.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTag(semver::Version);

impl VersionTag {
    /// Create a new version tag
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        VersionTag(semver::Version::new(major, minor, patch))
    }

    /// Parse a version from `X.Y.Z`, tolerating a `v`/`V` prefix
    /// (e.g. "v1.2.3" from metadata or release file names)
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let clean = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let version = semver::Version::parse(clean).map_err(|e| {
            GuardError::configuration(format!("Invalid version '{}': {}", raw, e))
        })?;

        if !version.pre.is_empty() || !version.build.is_empty() {
            return Err(GuardError::configuration(format!(
                "Invalid version '{}': expected MAJOR.MINOR.PATCH",
                raw
            )));
        }

        Ok(VersionTag(version))
    }

    /// Version of a per-release notes file named `vX.Y.Z.md`.
    ///
    /// Upgrade guides (`vX.Y.Z-upgrade.md`) and other files yield `None`.
    pub fn from_release_file(path: &Path) -> Option<Self> {
        static RELEASE_FILE: OnceLock<Regex> = OnceLock::new();
        let pattern = RELEASE_FILE.get_or_init(|| {
            Regex::new(r"^v((?:0|[1-9]\d*)\.(?:0|[1-9]\d*)\.(?:0|[1-9]\d*))\.md$").expect("release file pattern is valid")
        });

        let name = path.file_name()?.to_str()?;
        let captures = pattern.captures(name)?;
        Self::parse(captures.get(1)?.as_str()).ok()
    }

    /// Bracketed form used in release notes headings, e.g. `[1.2.0]`
    pub fn bracketed(&self) -> String {
        format!("[{}]", self)
    }

    /// Prefixed form used in per-release file names, e.g. `v1.2.0`
    pub fn prefixed(&self) -> String {
        format!("v{}", self)
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
