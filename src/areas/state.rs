//! Persistent engine state
//!
//! The commit graph, branch table and staging index are persisted together
//! as a single JSON document at `.grit/state`. The file is rewritten as a
//! whole on every save; a file lock guards readers against a concurrent
//! writer torn mid-rewrite.

use crate::artifacts::branch::BranchTable;
use crate::artifacts::graph::CommitGraph;
use crate::artifacts::index::StagingIndex;
use anyhow::Context;
use file_guard::Lock;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

/// Aggregate of everything the engine persists besides blob payloads
#[derive(Debug, Serialize, Deserialize)]
pub struct EngineState {
    pub graph: CommitGraph,
    pub branches: BranchTable,
    pub index: StagingIndex,
}

impl EngineState {
    pub fn bootstrap() -> Self {
        let (graph, root_id) = CommitGraph::bootstrap();

        EngineState {
            graph,
            branches: BranchTable::bootstrap(root_id),
            index: StagingIndex::default(),
        }
    }

    /// Read the state file, returning `None` when it does not exist
    ///
    /// Acquires a shared lock on the state file while reading.
    pub fn load(state_path: &Path) -> anyhow::Result<Option<Self>> {
        if !state_path.exists() {
            return Ok(None);
        }

        let mut state_file = std::fs::File::open(state_path).context(format!(
            "Unable to open state file {}",
            state_path.display()
        ))?;

        let mut lock = file_guard::lock(&mut state_file, Lock::Shared, 0, 1)?;

        let mut raw_state = String::new();
        lock.deref_mut()
            .read_to_string(&mut raw_state)
            .context("Unable to read state file")?;

        let state = serde_json::from_str(&raw_state).context("Malformed state file")?;

        Ok(Some(state))
    }

    /// Rewrite the state file with the current in-memory state
    ///
    /// Acquires an exclusive lock on the state file during the rewrite.
    pub fn save(&self, state_path: &Path) -> anyhow::Result<()> {
        let mut state_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(state_path)
            .context(format!(
                "Unable to open state file {}",
                state_path.display()
            ))?;

        let mut lock = file_guard::lock(&mut state_file, Lock::Exclusive, 0, 1)?;

        let raw_state = serde_json::to_string(self).context("Unable to serialize state")?;
        lock.deref_mut()
            .write_all(raw_state.as_bytes())
            .context("Unable to write state file")?;

        Ok(())
    }
}
