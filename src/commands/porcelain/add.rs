use crate::areas::repository::Repository;
use crate::artifacts::core::EngineError;

impl Repository {
    /// Stage a workspace file for the next commit
    ///
    /// Storing the blob first is safe: the store is content-addressed and
    /// append-only, so an orphaned blob from a later failure is invisible.
    pub fn add(&mut self, path: &str) -> anyhow::Result<()> {
        self.state()?;

        if !self.workspace().exists(path) {
            return Err(EngineError::FileNotFound.into());
        }

        let content = self.workspace().read_file(path)?;
        let blob_id = self.store().put(content)?;

        let head_manifest = self.head_manifest()?.clone();
        self.state_mut()?.index.stage(path, blob_id, &head_manifest);

        self.save()
    }
}
