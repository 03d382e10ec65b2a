use crate::areas::repository::Repository;
use crate::artifacts::core::EngineError;
use std::io::Write;

impl Repository {
    /// Print the ids of every commit with exactly the given message
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let state = self.state()?;

        let mut matches = state
            .graph
            .all()
            .filter(|(_, commit)| commit.message() == message)
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(EngineError::NoMatchingCommit.into());
        }

        matches.sort_by(|(a_id, a), (b_id, b)| {
            b.timestamp().cmp(&a.timestamp()).then(a_id.cmp(b_id))
        });

        let mut writer = self.writer();
        for (id, _) in matches {
            writeln!(writer, "{id}")?;
        }

        Ok(())
    }
}
