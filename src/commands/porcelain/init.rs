use crate::areas::repository::Repository;

impl Repository {
    /// Create the engine directory with a root commit on `master`
    ///
    /// Prints nothing on success; refuses when an engine directory is
    /// already present.
    pub fn init(&mut self) -> anyhow::Result<()> {
        self.bootstrap()
    }
}
