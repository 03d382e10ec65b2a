use crate::areas::repository::Repository;
use crate::artifacts::status::StatusReport;
use std::io::Write;

impl Repository {
    /// Display branches, staged changes and workspace drift
    pub fn status(&self) -> anyhow::Result<()> {
        let report = StatusReport::gather(self.state()?, self.workspace())?;

        write!(self.writer(), "{}", report.render())?;

        Ok(())
    }
}
