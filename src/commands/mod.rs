//! Engine command implementations
//!
//! This module contains all user-facing command implementations. Each
//! command is a method on [`crate::areas::repository::Repository`] and
//! composes the areas and artifacts into a complete workflow.

pub mod porcelain;
