//! Candidate enumeration from remote-tracking references

use crate::error::{Error, Result};
use crate::refs::{is_remote_branch, qualified_name, ref_kind, split_qualified_name};
use crate::repo::ReferenceStore;
use crate::scan::observer::ScanObserver;
use crate::types::BranchHead;
use std::collections::HashSet;
use std::hash::BuildHasher;
use tracing::debug;

/// Collect the remote branches of `remote` that are eligible for deletion
///
/// The remote must be configured, otherwise a mistyped name would silently
/// yield nothing. `remote/master` and anything whose short name is in `skip`
/// are excluded. An empty result is not an error.
pub fn enumerate_candidates<S: BuildHasher>(
    store: &dyn ReferenceStore,
    remote: &str,
    master: &str,
    skip: &HashSet<String, S>,
    observer: &dyn ScanObserver,
) -> Result<Vec<BranchHead>> {
    let remotes = store.remote_names()?;
    if !remotes.iter().any(|name| name == remote) {
        return Err(Error::RemoteNotFound(remote.to_string()));
    }

    let master_ref = format!("{remote}/{master}");
    let mut candidates = Vec::new();

    for entry in store.references()? {
        if !is_remote_branch(&entry) {
            debug!(
                name = %entry.name,
                kind = %ref_kind(&entry.name),
                "not a remote branch, ignoring"
            );
            continue;
        }
        let Some(hash) = entry.hash() else {
            continue;
        };

        let name = qualified_name(&entry.name);
        if name == master_ref {
            continue;
        }

        let (branch_remote, short) = split_qualified_name(name);
        if branch_remote != remote {
            debug!(branch = name, remote, "branch does not match remote, not adding");
            continue;
        }

        let head = BranchHead::new(branch_remote, short, hash);
        if skip.contains(short) {
            observer.branch_skipped(&head);
            continue;
        }

        debug!(branch = %head.name, head = %head.hash, "remote branch candidate");
        candidates.push(head);
    }

    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(candidates)
}
