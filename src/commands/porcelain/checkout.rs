use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::EngineError;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Switch the workspace to another branch's head commit
    ///
    /// The conflict scan runs before any file is touched, so a refused
    /// checkout changes nothing.
    pub fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let state = self.state()?;

        let target_id = state
            .branches
            .head_of(name)
            .ok_or(EngineError::NoSuchCheckoutBranch)?
            .clone();

        if name == state.branches.current() {
            return Err(EngineError::AlreadyCurrent.into());
        }

        let current_manifest = self.head_manifest()?.clone();
        let target_manifest = self.state()?.graph.require(&target_id)?.manifest().clone();

        let migration = Migration::new(
            self.workspace(),
            self.store(),
            &current_manifest,
            &target_manifest,
        );
        migration.check_conflicts(self.state()?.index.additions())?;
        migration.apply_changes()?;

        let state = self.state_mut()?;
        state.branches.set_current(name);
        state.index.clear();

        self.save()
    }

    /// Restore a single file from the head commit
    pub fn checkout_file(&self, path: &str) -> anyhow::Result<()> {
        let head_id = self.state()?.branches.current_head().clone();

        self.restore_file(&head_id, path)
    }

    /// Restore a single file from an arbitrary commit
    ///
    /// Accepts abbreviated commit ids.
    pub fn checkout_commit_file(&self, commit_id: &str, path: &str) -> anyhow::Result<()> {
        let commit_id = self.state()?.graph.lookup_by_prefix(commit_id)?;

        self.restore_file(&commit_id, path)
    }

    fn restore_file(&self, commit_id: &ObjectId, path: &str) -> anyhow::Result<()> {
        let state = self.state()?;

        let blob_id = state
            .graph
            .require(commit_id)?
            .blob_id(path)
            .ok_or(EngineError::FileNotInCommit)?;

        let content = self.store().get(blob_id)?;
        self.workspace().write_file(path, &content)
    }
}
