//! Reference classification
//!
//! Pure helpers for telling remote-tracking branches apart from everything
//! else, and for splitting `remote/branch` names.

use crate::types::{RefEntry, RefKind, RefTarget};

/// Namespace prefix of remote-tracking references
pub const REMOTES_PREFIX: &str = "refs/remotes/";

/// Namespace prefix of local branches
pub const HEADS_PREFIX: &str = "refs/heads/";

/// Namespace prefix of tags
pub const TAGS_PREFIX: &str = "refs/tags/";

/// Classify a fully qualified reference name by namespace
pub fn ref_kind(full_name: &str) -> RefKind {
    if full_name.starts_with(REMOTES_PREFIX) {
        RefKind::RemoteBranch
    } else if full_name.starts_with(HEADS_PREFIX) {
        RefKind::LocalBranch
    } else if full_name.starts_with(TAGS_PREFIX) {
        RefKind::Tag
    } else {
        RefKind::Other
    }
}

/// Whether a reference is a real remote-tracking branch
///
/// Symbolic refs and the `<remote>/HEAD` alias are rejected: they would point
/// at the same commit as another branch and produce false matches.
pub fn is_remote_branch(entry: &RefEntry) -> bool {
    if ref_kind(&entry.name) != RefKind::RemoteBranch {
        return false;
    }
    if matches!(entry.target, RefTarget::Symbolic(_)) {
        return false;
    }
    !entry.name.ends_with("/HEAD")
}

/// Strip `refs/remotes/` from a remote-tracking reference name
pub fn qualified_name(full_name: &str) -> &str {
    full_name.strip_prefix(REMOTES_PREFIX).unwrap_or(full_name)
}

/// Split `remote/branch` at the first `/`
///
/// Without a separator (or with a leading one) the whole input is the remote
/// and the branch is empty. Anything after the first separator is kept as-is,
/// so `origin/feature/sub` yields `("origin", "feature/sub")`.
pub fn split_qualified_name(name: &str) -> (&str, &str) {
    match name.split_once('/') {
        Some((remote, short)) if !remote.is_empty() => (remote, short),
        _ => (name, ""),
    }
}
