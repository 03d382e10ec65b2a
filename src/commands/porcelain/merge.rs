use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::EngineError;
use crate::artifacts::graph::split_point::SplitPointFinder;
use crate::artifacts::merge::resolution;
use crate::artifacts::objects::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Merge the given branch into the current one
    ///
    /// Resolves the split point, classifies every path, rewrites the
    /// workspace and records a two-parent merge commit. Conflicted paths
    /// get marker files and the merge commit is created regardless; the
    /// conflict notice is informational, not a failure.
    pub fn merge(&mut self, name: &str) -> anyhow::Result<()> {
        let state = self.state()?;

        let given_id = state
            .branches
            .head_of(name)
            .ok_or(EngineError::NoSuchBranch)?
            .clone();

        if !state.index.is_empty() {
            return Err(EngineError::UncommittedChanges.into());
        }

        if name == state.branches.current() {
            return Err(EngineError::SelfMerge.into());
        }

        let current_name = state.branches.current().to_string();
        let current_id = state.branches.current_head().clone();

        let current_manifest = state.graph.require(&current_id)?.manifest().clone();
        let given_manifest = state.graph.require(&given_id)?.manifest().clone();

        // the untracked scan runs against the given side before anything
        // else happens, so a refused merge leaves no trace
        Migration::new(
            self.workspace(),
            self.store(),
            &current_manifest,
            &given_manifest,
        )
        .check_conflicts(state.index.additions())?;

        let split_id = SplitPointFinder::new(&state.graph)
            .find(&current_id, &given_id)
            .context("merge heads share no history")?;

        if split_id == given_id {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        if split_id == current_id {
            return self.fast_forward(&current_manifest, &given_manifest, given_id);
        }

        let split_manifest = self.state()?.graph.require(&split_id)?.manifest().clone();

        let plan = resolution::plan(&split_manifest, &current_manifest, &given_manifest);

        // materialize conflict marker files up front so the whole merge
        // result is a single manifest the migration can move to
        let mut conflict_blobs = Vec::new();
        for path in &plan.conflicts {
            let rendered = resolution::conflict_file(
                self.read_side(&current_manifest, path)?.as_deref(),
                self.read_side(&given_manifest, path)?.as_deref(),
            );
            conflict_blobs.push((path.clone(), self.store().put(rendered)?));
        }

        let mut target_manifest = current_manifest.clone();
        for (path, blob_id) in plan.take_given.iter().chain(&conflict_blobs) {
            target_manifest.insert(path.clone(), blob_id.clone());
        }
        for path in &plan.removals {
            target_manifest.remove(path);
        }

        Migration::new(
            self.workspace(),
            self.store(),
            &current_manifest,
            &target_manifest,
        )
        .apply_changes()?;

        let state = self.state_mut()?;
        for (path, blob_id) in plan.take_given.iter().chain(&conflict_blobs) {
            state.index.stage(path, blob_id.clone(), &current_manifest);
        }
        for path in &plan.removals {
            state.index.mark_removed(path, &current_manifest)?;
        }

        let message = format!("Merged {name} into {current_name}.");
        self.write_commit(&message, vec![current_id, given_id])?;
        self.save()?;

        if !plan.is_clean() {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    /// Move the current branch up to the given head without a new commit
    fn fast_forward(
        &mut self,
        current_manifest: &Manifest,
        given_manifest: &Manifest,
        given_id: ObjectId,
    ) -> anyhow::Result<()> {
        Migration::new(
            self.workspace(),
            self.store(),
            current_manifest,
            given_manifest,
        )
        .apply_changes()?;

        self.advance_head(given_id)?;
        self.save()?;

        writeln!(self.writer(), "Current branch fast-forwarded.")?;

        Ok(())
    }

    fn read_side(&self, manifest: &Manifest, path: &str) -> anyhow::Result<Option<bytes::Bytes>> {
        manifest
            .get(path)
            .map(|blob_id| self.store().get(blob_id))
            .transpose()
    }
}
