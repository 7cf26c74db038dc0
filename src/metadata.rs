//! Docs metadata document (`docs/metadata.json`)

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::VersionTag;
use crate::error::{GuardError, Result};

/// The parts of the docs metadata the guard relies on.
///
/// Other keys in the document are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DocsMetadata {
    pub current_release: String,
}

impl DocsMetadata {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Load metadata from disk, failing with [`GuardError::MissingFile`] if absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(GuardError::MissingFile(path.to_path_buf()));
        }
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// The current release as a version (`v` prefix allowed).
    pub fn current_release(&self) -> Result<VersionTag> {
        VersionTag::parse(&self.current_release).map_err(|_| {
            GuardError::configuration(format!(
                "metadata current_release '{}' is not a MAJOR.MINOR.PATCH version",
                self.current_release
            ))
        })
    }
}
