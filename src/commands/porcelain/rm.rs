use crate::areas::repository::Repository;
use crate::artifacts::index::Removal;

impl Repository {
    /// Unstage a file, or mark a tracked file for removal
    ///
    /// A tracked file is also deleted from the workspace; a file that was
    /// merely staged is only unstaged and left on disk.
    pub fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let head_manifest = self.head_manifest()?.clone();

        let removal = self.state_mut()?.index.mark_removed(path, &head_manifest)?;

        if removal == Removal::Tracked {
            self.workspace().delete_file(path)?;
        }

        self.save()
    }
}
