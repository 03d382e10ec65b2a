use crate::areas::repository::Repository;
use crate::artifacts::core::EngineError;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::Local;

impl Repository {
    /// Commit the staged snapshot onto the current branch
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        if self.state()?.index.is_empty() {
            return Err(EngineError::NothingToCommit.into());
        }

        let head_id = self.state()?.branches.current_head().clone();
        self.write_commit(message, vec![head_id])?;

        self.save()
    }

    /// Create a commit from the staged snapshot with the given parents
    ///
    /// Shared by `commit` and `merge`. Clears the staging index and
    /// advances the current branch; persisting is the caller's job.
    pub(crate) fn write_commit(
        &mut self,
        message: &str,
        parents: Vec<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let head_manifest = self.head_manifest()?.clone();

        let state = self.state_mut()?;
        let manifest = state.index.snapshot(&head_manifest);
        let commit_id = state.graph.create(
            manifest,
            message.to_string(),
            parents,
            Local::now().fixed_offset(),
        )?;

        state.index.clear();
        state.branches.advance(commit_id.clone());

        Ok(commit_id)
    }
}
