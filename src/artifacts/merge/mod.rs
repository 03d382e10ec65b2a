//! Three-way merge planning
//!
//! Merging reconciles the current and given branch manifests against the
//! manifest of their split point. Classification happens per path and is
//! purely functional; applying the resulting plan to the workspace and
//! index is the merge command's job.

pub(crate) mod resolution;
