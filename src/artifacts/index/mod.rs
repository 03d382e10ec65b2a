//! Staging index
//!
//! The staging index is the mutable pending-change set layered on top of
//! the current head commit's manifest. It holds two independent sets:
//!
//! - `additions`: path -> blob identity of captured content (content is
//!   promoted into the blob store when staged, so staging identical bytes
//!   twice stores nothing new)
//! - `removals`: paths marked for deletion in the next commit
//!
//! Invariant: a path is never simultaneously in both sets. Both sets are
//! emptied on every successful commit, branch checkout or reset.

use crate::artifacts::core::EngineError;
use crate::artifacts::objects::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Effect of marking a path removed, used by the caller to decide whether
/// the working copy should be deleted as well
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The path was only staged; the pending addition has been dropped
    Unstaged,
    /// The path is tracked by the head commit and is now marked for
    /// deletion
    Tracked,
}

/// Mutable pending-change set between the working directory and the next
/// commit
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StagingIndex {
    additions: BTreeMap<String, ObjectId>,
    removals: BTreeSet<String>,
}

impl StagingIndex {
    /// Record `path -> blob_id` in the additions set
    ///
    /// Clears any removal mark on the path. If the staged content is
    /// identical to what the head commit already records for `path`, the
    /// staging entry is dropped instead: nothing actually changed.
    pub fn stage(&mut self, path: &str, blob_id: ObjectId, head_manifest: &Manifest) {
        self.removals.remove(path);

        if head_manifest.get(path) == Some(&blob_id) {
            self.additions.remove(path);
        } else {
            self.additions.insert(path.to_string(), blob_id);
        }
    }

    /// Unstage `path` and/or mark it for removal from the next commit
    ///
    /// Fails with `NothingToRemove` if the path is neither staged nor
    /// tracked by the head commit.
    pub fn mark_removed(&mut self, path: &str, head_manifest: &Manifest) -> anyhow::Result<Removal> {
        let was_staged = self.additions.remove(path).is_some();

        if head_manifest.contains_key(path) {
            self.removals.insert(path.to_string());
            return Ok(Removal::Tracked);
        }

        if was_staged {
            Ok(Removal::Unstaged)
        } else {
            Err(EngineError::NothingToRemove.into())
        }
    }

    /// Produce the manifest for the next commit
    ///
    /// The head manifest with every removal deleted and every addition
    /// inserted (overwriting). Staged content already lives in the blob
    /// store, so the result can be installed into a commit directly.
    pub fn snapshot(&self, head_manifest: &Manifest) -> Manifest {
        let mut manifest = head_manifest.clone();

        for path in &self.removals {
            manifest.remove(path);
        }
        for (path, blob_id) in &self.additions {
            manifest.insert(path.clone(), blob_id.clone());
        }

        manifest
    }

    /// True iff both sets are empty; committing is rejected in that case
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Empty both sets
    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn is_staged(&self, path: &str) -> bool {
        self.additions.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head_with(entries: &[(&str, &[u8])]) -> Manifest {
        entries
            .iter()
            .map(|(path, content)| (path.to_string(), ObjectId::digest(content)))
            .collect()
    }

    #[test]
    fn staging_clears_a_pending_removal() {
        let head = head_with(&[("a.txt", b"old")]);
        let mut index = StagingIndex::default();

        index.mark_removed("a.txt", &head).unwrap();
        assert!(index.removals().contains("a.txt"));

        index.stage("a.txt", ObjectId::digest(b"new"), &head);

        assert!(!index.removals().contains("a.txt"));
        assert!(index.is_staged("a.txt"));
    }

    #[test]
    fn staging_unchanged_content_is_a_no_op() {
        let head = head_with(&[("a.txt", b"same")]);
        let mut index = StagingIndex::default();

        index.stage("a.txt", ObjectId::digest(b"same"), &head);

        assert!(index.is_empty());
    }

    #[test]
    fn restaging_head_content_drops_the_pending_addition() {
        let head = head_with(&[("a.txt", b"same")]);
        let mut index = StagingIndex::default();

        index.stage("a.txt", ObjectId::digest(b"edited"), &head);
        assert!(index.is_staged("a.txt"));

        index.stage("a.txt", ObjectId::digest(b"same"), &head);

        assert!(index.is_empty());
    }

    #[test]
    fn a_path_is_never_in_both_sets() {
        let head = head_with(&[("a.txt", b"old")]);
        let mut index = StagingIndex::default();

        index.stage("a.txt", ObjectId::digest(b"new"), &head);
        index.mark_removed("a.txt", &head).unwrap();

        assert!(!index.is_staged("a.txt"));
        assert!(index.removals().contains("a.txt"));
    }

    #[test]
    fn removing_an_untracked_unstaged_path_is_rejected() {
        let mut index = StagingIndex::default();

        let error = index.mark_removed("ghost.txt", &Manifest::new()).unwrap_err();

        assert_eq!(
            error.downcast_ref::<EngineError>(),
            Some(&EngineError::NothingToRemove)
        );
    }

    #[test]
    fn removing_a_staged_untracked_path_only_unstages_it() {
        let mut index = StagingIndex::default();
        index.stage("new.txt", ObjectId::digest(b"fresh"), &Manifest::new());

        let removal = index.mark_removed("new.txt", &Manifest::new()).unwrap();

        assert_eq!(removal, Removal::Unstaged);
        assert!(index.is_empty());
    }

    #[test]
    fn snapshot_layers_both_sets_over_the_head_manifest() {
        let head = head_with(&[("keep.txt", b"keep"), ("drop.txt", b"drop"), ("edit.txt", b"old")]);
        let mut index = StagingIndex::default();

        index.stage("edit.txt", ObjectId::digest(b"new"), &head);
        index.stage("add.txt", ObjectId::digest(b"fresh"), &head);
        index.mark_removed("drop.txt", &head).unwrap();

        let manifest = index.snapshot(&head);

        assert_eq!(manifest.get("keep.txt"), Some(&ObjectId::digest(b"keep")));
        assert_eq!(manifest.get("edit.txt"), Some(&ObjectId::digest(b"new")));
        assert_eq!(manifest.get("add.txt"), Some(&ObjectId::digest(b"fresh")));
        assert!(!manifest.contains_key("drop.txt"));
    }
}
