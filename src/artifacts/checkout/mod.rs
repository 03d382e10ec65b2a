//! Workspace migration between commits
//!
//! Checkout, reset and merge all move the working directory from one
//! manifest to another. The [`migration::Migration`] type plans that move,
//! refuses it when an untracked file would be clobbered, and applies it as
//! a write-then-prune pass.

pub(crate) mod migration;
