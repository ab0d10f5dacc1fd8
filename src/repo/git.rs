//! gix-backed repository adapter

use crate::error::{Error, Result};
use crate::repo::{HistoryWalker, ReferenceStore};
use crate::types::{CommitRef, RefEntry, RefTarget};
use gix::refs::TargetRef;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A git repository opened with gix
///
/// Holds the thread-safe handle so history can be walked from a blocking
/// producer thread while the caller keeps using the store.
pub struct GitRepository {
    repo: gix::ThreadSafeRepository,
    root: PathBuf,
}

impl GitRepository {
    /// Discover the repository containing `path`
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = gix::ThreadSafeRepository::discover(path)
            .map_err(|e| Error::NotARepository(format!("{}: {e}", path.display())))?;

        let root = {
            let local = repo.to_thread_local();
            local
                .workdir()
                .map_or_else(|| local.git_dir().to_path_buf(), Path::to_path_buf)
        };
        debug!(root = %root.display(), "opened repository");

        Ok(Self { repo, root })
    }

    /// Working tree root (or git dir for bare repositories)
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ReferenceStore for GitRepository {
    fn remote_names(&self) -> Result<Vec<String>> {
        let repo = self.repo.to_thread_local();
        Ok(repo
            .remote_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect())
    }

    fn references(&self) -> Result<Vec<RefEntry>> {
        let repo = self.repo.to_thread_local();
        let platform = repo
            .references()
            .map_err(|e| Error::git("list references", e))?;
        let iter = platform
            .all()
            .map_err(|e| Error::git("list references", e))?;

        let mut entries = Vec::new();
        for reference in iter {
            let reference = reference.map_err(|e| Error::git("iterate references", e))?;
            let name = reference.name().as_bstr().to_string();
            let target = match reference.target() {
                TargetRef::Object(id) => RefTarget::Direct(id.to_owned().into()),
                TargetRef::Symbolic(target) => RefTarget::Symbolic(target.as_bstr().to_string()),
            };
            entries.push(RefEntry { name, target });
        }
        Ok(entries)
    }

    fn resolve(&self, full_name: &str) -> Result<Option<CommitRef>> {
        let repo = self.repo.to_thread_local();
        let Some(mut reference) = repo
            .try_find_reference(full_name)
            .map_err(|e| Error::git("find reference", e))?
        else {
            return Ok(None);
        };

        let id = reference
            .peel_to_id()
            .map_err(|e| Error::git("resolve reference", e))?;
        Ok(Some(id.detach().into()))
    }
}

impl HistoryWalker for GitRepository {
    fn walk(
        &self,
        start: CommitRef,
        visit: &mut dyn FnMut(CommitRef) -> ControlFlow<()>,
    ) -> Result<()> {
        let repo = self.repo.to_thread_local();
        let walk = repo
            .rev_walk([*start.object_id()])
            .all()
            .map_err(|e| Error::git("walk master history", e))?;

        for info in walk {
            let info = info.map_err(|e| Error::git("walk master history", e))?;
            if visit(info.id.into()).is_break() {
                break;
            }
        }
        Ok(())
    }
}
