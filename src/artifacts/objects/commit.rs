//! Commit object
//!
//! Commits represent snapshots of the working directory at specific points
//! in time. They contain:
//! - A manifest mapping each tracked path to its blob identity
//! - Parent commit ID(s): none for the root commit, one for ordinary
//!   commits, two for merge commits
//! - A timestamp and a commit message
//!
//! Commit identity is the SHA-1 of the serialized metadata and manifest,
//! so re-creating an identical commit yields the same id. Parents are plain
//! identity references into an append-only map; a commit can only reference
//! already-existing identities, which keeps the graph acyclic by
//! construction.

use crate::artifacts::objects::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Message of the synthesized root commit
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Immutable snapshot node in the commit graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    message: String,
    timestamp: DateTime<FixedOffset>,
    manifest: Manifest,
    parents: Vec<ObjectId>,
}

impl Commit {
    pub fn new(
        manifest: Manifest,
        message: String,
        parents: Vec<ObjectId>,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Commit {
            message,
            timestamp,
            manifest,
            parents,
        }
    }

    /// The synthesized root commit: fixed message, empty manifest, epoch
    /// timestamp, no parents
    pub fn root() -> Self {
        let epoch = FixedOffset::east_opt(0)
            .expect("zero offset is always valid")
            .timestamp_opt(0, 0)
            .unwrap();

        Commit {
            message: ROOT_COMMIT_MESSAGE.to_string(),
            timestamp: epoch,
            manifest: Manifest::new(),
            parents: Vec::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, if any; merge commits follow this edge in plain log
    /// traversal
    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() == 2
    }

    pub fn tracks(&self, path: &str) -> bool {
        self.manifest.contains_key(path)
    }

    pub fn blob_id(&self, path: &str) -> Option<&ObjectId> {
        self.manifest.get(path)
    }

    /// Identity of the commit: digest of the serialized metadata and
    /// manifest
    pub fn object_id(&self) -> ObjectId {
        ObjectId::digest(&self.serialize())
    }

    /// Canonical serialization used for identity computation
    ///
    /// Manifest entries come out sorted by path (BTreeMap order), so the
    /// form is deterministic for a given commit.
    fn serialize(&self) -> Vec<u8> {
        let mut content = Vec::new();

        for (path, blob_id) in &self.manifest {
            // writing into a Vec cannot fail
            let _ = writeln!(content, "blob {} {}", blob_id, path);
        }
        for parent in &self.parents {
            let _ = writeln!(content, "parent {}", parent);
        }
        let _ = writeln!(
            content,
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        );
        let _ = writeln!(content, "\n{}", self.message);

        content
    }

    /// Format timestamp in the log's human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 01 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %d %H:%M:%S %Y %z").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_of(entries: &[(&str, &[u8])]) -> Manifest {
        entries
            .iter()
            .map(|(path, content)| (path.to_string(), ObjectId::digest(content)))
            .collect()
    }

    #[test]
    fn identical_commits_share_an_identity() {
        let root = Commit::root();
        let manifest = manifest_of(&[("a.txt", b"one"), ("b.txt", b"two")]);
        let timestamp = Commit::root().timestamp();

        let first = Commit::new(
            manifest.clone(),
            "same snapshot".to_string(),
            vec![root.object_id()],
            timestamp,
        );
        let second = Commit::new(
            manifest,
            "same snapshot".to_string(),
            vec![root.object_id()],
            timestamp,
        );

        assert_eq!(first.object_id(), second.object_id());
    }

    #[test]
    fn identity_covers_message_manifest_and_parents() {
        let root = Commit::root();
        let manifest = manifest_of(&[("a.txt", b"one")]);
        let timestamp = root.timestamp();

        let base = Commit::new(
            manifest.clone(),
            "snapshot".to_string(),
            vec![root.object_id()],
            timestamp,
        );
        let other_message = Commit::new(
            manifest.clone(),
            "different".to_string(),
            vec![root.object_id()],
            timestamp,
        );
        let other_manifest = Commit::new(
            manifest_of(&[("a.txt", b"changed")]),
            "snapshot".to_string(),
            vec![root.object_id()],
            timestamp,
        );
        let orphan = Commit::new(manifest, "snapshot".to_string(), Vec::new(), timestamp);

        assert_ne!(base.object_id(), other_message.object_id());
        assert_ne!(base.object_id(), other_manifest.object_id());
        assert_ne!(base.object_id(), orphan.object_id());
    }

    #[test]
    fn root_commit_is_fixed() {
        let root = Commit::root();

        assert!(root.is_root());
        assert!(!root.is_merge());
        assert!(root.manifest().is_empty());
        assert_eq!(root.message(), ROOT_COMMIT_MESSAGE);
        assert_eq!(root.timestamp().timestamp(), 0);
        assert_eq!(root.object_id(), Commit::root().object_id());
    }

    #[test]
    fn readable_timestamp_matches_log_format() {
        assert_eq!(
            Commit::root().readable_timestamp(),
            "Thu Jan 01 00:00:00 1970 +0000"
        );
    }
}
