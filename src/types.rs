//! Core types for gitsweeper

use crate::error::{Error, Result};
use gix::ObjectId;

/// Identifier of a single commit
///
/// Wraps the repository's fixed-width object hash. Equality is byte-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitRef(ObjectId);

impl CommitRef {
    /// Parse a full hex object id (40 chars for SHA-1)
    pub fn from_hex(hex: &str) -> Result<Self> {
        ObjectId::from_hex(hex.as_bytes())
            .map(Self)
            .map_err(|e| Error::git("parse commit id", format!("{hex}: {e}")))
    }

    /// The underlying object id
    pub const fn object_id(&self) -> &ObjectId {
        &self.0
    }
}

impl From<ObjectId> for CommitRef {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CommitRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a reference points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefTarget {
    /// Points directly at a commit
    Direct(CommitRef),
    /// Alias for another reference (e.g. `refs/remotes/origin/HEAD`)
    Symbolic(String),
}

/// A reference as listed by the reference store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEntry {
    /// Fully qualified name (e.g. `refs/remotes/origin/feature`)
    pub name: String,
    /// Reference target
    pub target: RefTarget,
}

impl RefEntry {
    /// Create a reference pointing directly at a commit
    pub fn direct(name: impl Into<String>, hash: CommitRef) -> Self {
        Self {
            name: name.into(),
            target: RefTarget::Direct(hash),
        }
    }

    /// Create a symbolic reference
    pub fn symbolic(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: RefTarget::Symbolic(target.into()),
        }
    }

    /// Commit this reference points at, if it is a direct reference
    pub const fn hash(&self) -> Option<CommitRef> {
        match self.target {
            RefTarget::Direct(hash) => Some(hash),
            RefTarget::Symbolic(_) => None,
        }
    }
}

/// Namespace a reference belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// `refs/remotes/*`
    RemoteBranch,
    /// `refs/heads/*`
    LocalBranch,
    /// `refs/tags/*`
    Tag,
    /// Anything else (notes, stash, pseudo refs)
    Other,
}

impl std::fmt::Display for RefKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RemoteBranch => write!(f, "remote branch"),
            Self::LocalBranch => write!(f, "local branch"),
            Self::Tag => write!(f, "tag"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A remote branch being checked for "already merged" status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchHead {
    /// Qualified name (`remote/short`)
    pub name: String,
    /// Commit the branch points at
    pub hash: CommitRef,
    /// Remote name (e.g. "origin")
    pub remote: String,
    /// Branch name on the remote, may contain `/`
    pub short: String,
}

impl BranchHead {
    /// Create a branch head from its remote and short name
    pub fn new(remote: &str, short: &str, hash: CommitRef) -> Self {
        Self {
            name: format!("{remote}/{short}"),
            hash,
            remote: remote.to_string(),
            short: short.to_string(),
        }
    }
}
