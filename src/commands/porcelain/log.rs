use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Display the first-parent history of the current branch
    ///
    /// Second parents of merge commits are summarized on a `Merge:` line
    /// but not walked.
    pub fn log(&self) -> anyhow::Result<()> {
        let state = self.state()?;
        let head_id = state.branches.current_head().clone();

        for id in state.graph.ancestors(&head_id) {
            let commit = state.graph.require(&id)?;
            self.print_commit(&id, commit)?;
        }

        Ok(())
    }

    /// Display every commit ever made, newest first
    pub fn global_log(&self) -> anyhow::Result<()> {
        let state = self.state()?;

        let mut commits = state.graph.all().collect::<Vec<_>>();
        commits.sort_by(|(a_id, a), (b_id, b)| {
            b.timestamp().cmp(&a.timestamp()).then(a_id.cmp(b_id))
        });

        for (id, commit) in commits {
            self.print_commit(id, commit)?;
        }

        Ok(())
    }

    fn print_commit(&self, id: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {id}")?;

        if let [first, second] = commit.parents() {
            writeln!(
                writer,
                "Merge: {} {}",
                first.to_short_oid(),
                second.to_short_oid()
            )?;
        }

        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
