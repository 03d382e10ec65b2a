//! Engine areas
//!
//! This module contains the storage surfaces the engine coordinates:
//!
//! - `repository`: High-level facade and coordination over all areas
//! - `state`: Persistent commit graph, branch table and staging index
//! - `store`: Content-addressed blob storage
//! - `workspace`: Working directory file system operations

pub mod repository;
pub(crate) mod state;
pub(crate) mod store;
pub(crate) mod workspace;
