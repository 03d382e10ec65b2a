use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Move the current branch to an arbitrary commit and check it out
    ///
    /// Accepts abbreviated commit ids. The commit may be anywhere in the
    /// graph; resetting past a fork point leaves the abandoned commits in
    /// place, reachable through other branches or `log --global`.
    pub fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let target_id = self.state()?.graph.lookup_by_prefix(commit_id)?;

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
        state.branches.advance(target_id);
        state.index.clear();

        self.save()
    }
}
