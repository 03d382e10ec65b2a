//! Engine data structures and algorithms
//!
//! This module contains the core version-control types and algorithms:
//!
//! - `branch`: Branch table and head bookkeeping
//! - `checkout`: Workspace migration and conflict detection
//! - `core`: Shared error taxonomy
//! - `graph`: Commit DAG, ancestry traversal and split-point search
//! - `index`: Staging area data structures
//! - `merge`: Three-way merge classification and planning
//! - `objects`: Object types (blob, commit, object id)
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod graph;
pub mod index;
pub mod merge;
pub mod objects;
pub mod status;
