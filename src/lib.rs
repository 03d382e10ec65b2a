//! A single-user, local version-control engine
//!
//! Tracks snapshots of a flat working directory through a
//! content-addressed blob store, a commit DAG with branches, a staging
//! index and a three-way merge engine. Everything lives under `.grit/` in
//! the working directory; there is no network surface.

pub mod areas;
pub mod artifacts;
pub mod commands;
