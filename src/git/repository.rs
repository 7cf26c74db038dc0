use crate::error::Result;
use git2::{Delta, ErrorCode, Repository as Git2Repo, Tree};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn tree_at(&self, revision: &str) -> Result<Tree<'_>> {
        let object = self.repo.revparse_single(revision)?;
        Ok(object.peel_to_tree()?)
    }
}

impl super::RevisionSource for Git2Repository {
    fn read_file_at(&self, revision: &str, path: &Path) -> Result<Option<String>> {
        let tree = self.tree_at(revision)?;

        let entry = match tree.get_path(path) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => {
                tracing::debug!(revision, path = %path.display(), "path absent at revision");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let blob = entry.to_object(&self.repo)?.peel_to_blob()?;

        Ok(Some(String::from_utf8_lossy(blob.content()).into_owned()))
    }

    fn added_files(&self, base: &str, head: &str) -> Result<Vec<PathBuf>> {
        let base_tree = self.tree_at(base)?;
        let head_tree = self.tree_at(head)?;

        let diff = self
            .repo
            .diff_tree_to_tree(Some(&base_tree), Some(&head_tree), None)?;

        let added = diff
            .deltas()
            .filter(|delta| delta.status() == Delta::Added)
            .filter_map(|delta| delta.new_file().path().map(Path::to_path_buf))
            .collect();

        Ok(added)
    }

    fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }
}
