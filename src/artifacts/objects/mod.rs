//! Immutable repository objects
//!
//! All repository content is stored as objects identified by SHA-1 hashes:
//!
//! - **Blob**: immutable file content (raw bytes), keyed by the digest of
//!   the bytes
//! - **Commit**: immutable snapshot node with message, timestamp, manifest
//!   and parent links, keyed by the digest of its serialized form

pub mod blob;
pub mod commit;
pub mod object_id;

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Mapping from working-directory path to blob identity, as recorded by a
/// commit. Paths are unique by construction.
pub type Manifest = BTreeMap<String, ObjectId>;
