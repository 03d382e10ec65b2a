//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new engine directory
//! - `add`: Stage a file for commit
//! - `commit`: Create a new commit
//! - `rm`: Unstage a file or mark it for removal
//! - `log`: Show first-parent history, or every commit with `--global`
//! - `find`: List commits by exact message
//! - `status`: Show working tree status
//! - `checkout`: Switch branches or restore files
//! - `branch`: Create or delete branches
//! - `reset`: Move the current branch to an arbitrary commit
//! - `merge`: Three-way merge of a branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
