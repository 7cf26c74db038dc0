//! Revision access abstraction layer
//!
//! The guard needs two things from source control: the content of a file at
//! a given revision, and the files added between two revisions. The
//! [RevisionSource] trait captures exactly that so the guard can run against
//! a real repository or an in-memory one.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use release_docs_guard::git::RevisionSource;
//! # use std::path::Path;
//! # fn example<R: RevisionSource>(repo: &R) -> release_docs_guard::Result<()> {
//! let base = repo.read_file_at("origin/main", Path::new("docs/releases/RELEASES.md"))?;
//! if base.is_none() {
//!     println!("release notes are new in this change");
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Read-only access to repository content at arbitrary revisions
///
/// Revisions are anything the implementation can resolve: commit hashes,
/// branch names, or expressions like `HEAD~1`.
pub trait RevisionSource {
    /// Get the text of a file at a revision
    ///
    /// # Returns
    /// * `Ok(Some(String))` - File content (lossily decoded as UTF-8)
    /// * `Ok(None)` - The path does not exist at that revision
    /// * `Err` - The revision cannot be resolved, or another Git error
    fn read_file_at(&self, revision: &str, path: &Path) -> Result<Option<String>>;

    /// Get the paths added between two revisions
    ///
    /// Modified, deleted and renamed paths are not reported. Order is
    /// unspecified.
    fn added_files(&self, base: &str, head: &str) -> Result<Vec<PathBuf>>;

    /// Top-level working directory that revision paths are relative to
    ///
    /// `None` when the source has no checkout (bare or in-memory).
    fn workdir(&self) -> Option<&Path> {
        None
    }
}
