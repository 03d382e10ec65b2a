//! Migration planner and executor
//!
//! Moving between commits means rewriting the working directory from the
//! current manifest to the target manifest. The move happens in two
//! phases:
//!
//! 1. Conflict scan: refuse before touching anything if an untracked
//!    workspace file would be clobbered by the target
//! 2. Apply: write every target file, then prune files the current
//!    manifest tracks but the target does not
//!
//! The conflict scan runs strictly before any mutation, so a refused
//! migration leaves the workspace exactly as it was.

use crate::areas::store::BlobStore;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::EngineError;
use crate::artifacts::objects::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::collections::BTreeMap;

/// Planned move of the working directory between two manifests
#[derive(new)]
pub struct Migration<'r> {
    workspace: &'r Workspace,
    store: &'r BlobStore,
    current: &'r Manifest,
    target: &'r Manifest,
}

impl Migration<'_> {
    /// Scan for untracked workspace files the target would clobber
    ///
    /// A file is in the way when it exists in the workspace, is neither
    /// tracked by the current manifest nor staged, and the target tracks
    /// it with different content. The scan mutates nothing.
    pub fn check_conflicts(
        &self,
        staged_additions: &BTreeMap<String, ObjectId>,
    ) -> anyhow::Result<()> {
        for path in self.workspace.list_plain_files()? {
            if self.current.contains_key(&path) || staged_additions.contains_key(&path) {
                continue;
            }

            let Some(target_blob_id) = self.target.get(&path) else {
                continue;
            };

            let workspace_blob_id = ObjectId::digest(&self.workspace.read_file(&path)?);
            if workspace_blob_id != *target_blob_id {
                return Err(EngineError::UntrackedFileConflict.into());
            }
        }

        Ok(())
    }

    /// Rewrite the workspace to match the target manifest
    ///
    /// Writes every file the target tracks, then deletes files tracked by
    /// the current manifest but absent from the target. Untracked files
    /// are left alone.
    pub fn apply_changes(&self) -> anyhow::Result<()> {
        for (path, blob_id) in self.target {
            let content = self.store.get(blob_id)?;
            self.workspace.write_file(path, &content)?;
        }

        for path in self.current.keys() {
            if !self.target.contains_key(path) {
                self.workspace.delete_file(path)?;
            }
        }

        Ok(())
    }
}
