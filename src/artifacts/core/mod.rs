//! Core shared types
//!
//! This module contains the engine error taxonomy shared across the
//! application.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

/// Recoverable engine errors
///
/// Every variant maps to a single human-readable line and a clean
/// no-mutation abort: the command boundary prints the message and exits
/// cleanly, never leaving the blob store, commit graph, branch table or
/// staging index partially updated. Storage I/O failures are not part of
/// this taxonomy and propagate as plain [`anyhow`] errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("A grit version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Not in an initialized grit directory.")]
    Uninitialized,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("Found no commit with that message.")]
    NoMatchingCommit,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("A branch with that name does not exist.")]
    NoSuchBranch,

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    #[error("No such branch exists.")]
    NoSuchCheckoutBranch,

    #[error("No need to checkout the current branch.")]
    AlreadyCurrent,

    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("Ambiguous commit id prefix: {0}.")]
    AmbiguousPrefix(String),

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("blob {0} not found in the object store")]
    BlobNotFound(ObjectId),

    #[error("Incorrect operands.")]
    IncorrectOperands,
}
