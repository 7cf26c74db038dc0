use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use super::version::VersionTag;

/// A release heading line: `## [X.Y.Z] - YYYY-MM-DD`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseHeading {
    pub version: VersionTag,
    pub date: String,
}

fn heading_regex() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| {
        Regex::new(r"^## \[((?:0|[1-9]\d*)\.(?:0|[1-9]\d*)\.(?:0|[1-9]\d*))\] - (\d{4}-\d{2}-\d{2})\s*$")
            .expect("heading pattern is valid")
    })
}

/// Parse a single line as a release heading.
///
/// Lines that do not follow the heading grammar are not headings; this
/// never fails.
pub fn parse_heading(line: &str) -> Option<ReleaseHeading> {
    let captures = heading_regex().captures(line)?;
    let version = VersionTag::parse(captures.get(1)?.as_str()).ok()?;
    let date = captures.get(2)?.as_str().to_string();

    Some(ReleaseHeading { version, date })
}

/// All release headings in document order.
pub fn release_headings(document: &str) -> Vec<ReleaseHeading> {
    document.lines().filter_map(parse_heading).collect()
}

/// The set of versions declared by release headings in a document.
pub fn release_versions(document: &str) -> BTreeSet<VersionTag> {
    release_headings(document)
        .into_iter()
        .map(|heading| heading.version)
        .collect()
}
