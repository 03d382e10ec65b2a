use crate::areas::repository::Repository;

impl Repository {
    /// Create a new branch pointing at the current head commit
    ///
    /// Does not switch to it.
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let head_id = self.state()?.branches.current_head().clone();
        self.state_mut()?.branches.create(name, head_id)?;

        self.save()
    }

    /// Delete a branch pointer
    ///
    /// Only the pointer goes away; commits reachable from it are kept.
    pub fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.state_mut()?.branches.remove(name)?;

        self.save()
    }
}
