//! Branch table
//!
//! Branches are mutable named pointers holding exactly one commit identity
//! (their head). The table also names the single current branch. Heads are
//! non-owning references into the commit graph: deleting a branch never
//! deletes reachable commits, and ancestry is always derived on demand by
//! graph traversal rather than kept as per-branch commit lists.

use crate::artifacts::core::EngineError;
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the branch created on init
pub const DEFAULT_BRANCH: &str = "master";

/// Mapping from branch name to head commit identity, plus the current
/// branch selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchTable {
    heads: BTreeMap<String, ObjectId>,
    current: String,
}

impl BranchTable {
    /// Table holding only the default branch, pointed at the root commit
    pub fn bootstrap(root_id: ObjectId) -> Self {
        let mut heads = BTreeMap::new();
        heads.insert(DEFAULT_BRANCH.to_string(), root_id);

        BranchTable {
            heads,
            current: DEFAULT_BRANCH.to_string(),
        }
    }

    /// Create a new branch pointing at `head`
    ///
    /// Fails with `BranchExists` if the name is taken.
    pub fn create(&mut self, name: &str, head: ObjectId) -> anyhow::Result<()> {
        if self.heads.contains_key(name) {
            return Err(EngineError::BranchExists.into());
        }

        self.heads.insert(name.to_string(), head);
        Ok(())
    }

    /// Delete a branch
    ///
    /// Fails with `NoSuchBranch` for unknown names and
    /// `RemoveCurrentBranch` for the current branch. Commits reachable
    /// from the deleted head stay in the graph.
    pub fn remove(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.heads.contains_key(name) {
            return Err(EngineError::NoSuchBranch.into());
        }
        if name == self.current {
            return Err(EngineError::RemoveCurrentBranch.into());
        }

        self.heads.remove(name);
        Ok(())
    }

    pub fn head_of(&self, name: &str) -> Option<&ObjectId> {
        self.heads.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.heads.contains_key(name)
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Head identity of the current branch
    pub fn current_head(&self) -> &ObjectId {
        &self.heads[&self.current]
    }

    /// Switch the current-branch selector; the name must already exist
    pub fn set_current(&mut self, name: &str) {
        debug_assert!(self.heads.contains_key(name));
        self.current = name.to_string();
    }

    /// Move the current branch's head to `commit_id`
    pub fn advance(&mut self, commit_id: ObjectId) {
        let current = self.current.clone();
        self.heads.insert(current, commit_id);
    }

    /// Branch names in alphabetical order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.heads.keys().map(String::as_str)
    }
}
