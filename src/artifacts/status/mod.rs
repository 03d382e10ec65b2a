//! Working tree status report
//!
//! Gathers the five status sections from the branch table, the staging
//! index and a scan of the workspace, then renders them in a fixed
//! format. Gathering touches nothing; the report is a snapshot.

use crate::areas::state::EngineState;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;

/// Snapshot of the five status sections, entries pre-sorted
#[derive(Debug, PartialEq, Eq)]
pub struct StatusReport {
    branches: Vec<String>,
    staged: Vec<String>,
    removed: Vec<String>,
    modifications: Vec<String>,
    untracked: Vec<String>,
}

impl StatusReport {
    pub fn gather(state: &EngineState, workspace: &Workspace) -> anyhow::Result<Self> {
        let head = state.graph.require(state.branches.current_head())?;
        let head_manifest = head.manifest();
        let index = &state.index;

        let branches = state
            .branches
            .names()
            .map(|name| {
                if name == state.branches.current() {
                    format!("*{name}")
                } else {
                    name.to_string()
                }
            })
            .collect();

        let staged = index.additions().keys().cloned().collect();
        let removed = index.removals().iter().cloned().collect();

        // paths the next commit would track: staged version wins over the
        // tracked one, removal-marked paths are out of the picture
        let mut modifications = Vec::new();
        if !head.is_merge() {
            let expected: BTreeSet<(&String, &ObjectId)> = head_manifest
                .iter()
                .filter(|(path, _)| !index.additions().contains_key(*path))
                .chain(index.additions())
                .filter(|(path, _)| !index.removals().contains(*path))
                .collect();

            for (path, blob_id) in expected {
                if !workspace.exists(path) {
                    modifications.push(format!("{path} (deleted)"));
                } else if ObjectId::digest(&workspace.read_file(path)?) != *blob_id {
                    modifications.push(format!("{path} (modified)"));
                }
            }
        }

        let untracked = workspace
            .list_plain_files()?
            .into_iter()
            .filter(|path| {
                let known = head_manifest.contains_key(path)
                    || index.additions().contains_key(path);
                // a removal-marked path back in the workspace is untracked again
                !known || index.removals().contains(path)
            })
            .collect();

        Ok(StatusReport {
            branches,
            staged,
            removed,
            modifications,
            untracked,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        Self::section(&mut out, "=== Branches ===", &self.branches);
        Self::section(&mut out, "=== Staged Files ===", &self.staged);
        Self::section(&mut out, "=== Removed Files ===", &self.removed);
        Self::section(
            &mut out,
            "=== Modifications Not Staged For Commit ===",
            &self.modifications,
        );
        Self::section(&mut out, "=== Untracked Files ===", &self.untracked);

        out
    }

    fn section(out: &mut String, header: &str, entries: &[String]) {
        out.push_str(header);
        out.push('\n');
        for entry in entries {
            out.push_str(entry);
            out.push('\n');
        }
        out.push('\n');
    }
}
