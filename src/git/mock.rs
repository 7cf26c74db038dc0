use crate::error::Result;
use crate::git::RevisionSource;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock repository for testing without actual git operations
///
/// Each revision is a flat snapshot of path to content.
pub struct MockRepository {
    revisions: HashMap<String, HashMap<PathBuf, String>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            revisions: HashMap::new(),
        }
    }

    /// Register a revision with no files
    pub fn add_revision(&mut self, revision: impl Into<String>) {
        self.revisions.entry(revision.into()).or_default();
    }

    /// Set a file's content at a revision, registering the revision if needed
    pub fn set_file(
        &mut self,
        revision: impl Into<String>,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) {
        self.revisions
            .entry(revision.into())
            .or_default()
            .insert(path.into(), content.into());
    }

    fn snapshot(&self, revision: &str) -> Result<&HashMap<PathBuf, String>> {
        self.revisions.get(revision).ok_or_else(|| {
            git2::Error::from_str(&format!("revspec '{}' not found", revision)).into()
        })
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RevisionSource for MockRepository {
    fn read_file_at(&self, revision: &str, path: &Path) -> Result<Option<String>> {
        Ok(self.snapshot(revision)?.get(path).cloned())
    }

    fn added_files(&self, base: &str, head: &str) -> Result<Vec<PathBuf>> {
        let base = self.snapshot(base)?;
        let mut added: Vec<PathBuf> = self
            .snapshot(head)?
            .keys()
            .filter(|path| !base.contains_key(*path))
            .cloned()
            .collect();
        added.sort();
        Ok(added)
    }
}
