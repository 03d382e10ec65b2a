//! Blob object
//!
//! Blobs store file content. They contain only the raw bytes, without any
//! metadata like filename; paths live in commit manifests. Each unique
//! content is stored once, identified by the SHA-1 of its bytes.

use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use derive_new::new;

/// Immutable content-addressed byte payload
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    /// Get the blob content
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Identity of the blob: the digest of its bytes
    pub fn object_id(&self) -> ObjectId {
        ObjectId::digest(&self.content)
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Blob::new(Bytes::from(bytes))
    }
}
