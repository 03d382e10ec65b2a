//! Content-addressed blob store
//!
//! Blob payloads live under `.grit/blobs/<first-2-chars>/<rest>`, keyed by
//! the SHA-1 of their bytes and zlib-compressed on disk. Storage is
//! idempotent: putting identical bytes twice is a no-op, which gives
//! deduplication across commits for free. Blobs are never mutated and
//! never deleted (no GC).

use crate::artifacts::core::EngineError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug)]
pub struct BlobStore {
    path: Box<Path>,
}

impl BlobStore {
    pub fn new(path: Box<Path>) -> Self {
        BlobStore { path }
    }

    pub fn blobs_path(&self) -> &Path {
        &self.path
    }

    /// Store the given bytes under their content digest
    ///
    /// Writing is skipped when the key already exists, so two calls with
    /// identical bytes always yield the same identity and store one copy.
    pub fn put(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        let blob = Blob::new(content);
        let blob_id = blob.object_id();
        let blob_path = self.path.join(blob_id.to_path());

        if !blob_path.exists() {
            std::fs::create_dir_all(
                blob_path
                    .parent()
                    .context(format!("Invalid blob path {}", blob_path.display()))?,
            )
            .context(format!(
                "Unable to create blob directory {}",
                blob_path.display()
            ))?;

            self.write_blob(blob_path, blob.content())?;
        }

        Ok(blob_id)
    }

    /// Load the bytes stored under the given key
    ///
    /// Fails with `BlobNotFound` if the key is unknown.
    pub fn get(&self, blob_id: &ObjectId) -> anyhow::Result<Bytes> {
        let blob_path = self.path.join(blob_id.to_path());

        if !blob_path.exists() {
            return Err(EngineError::BlobNotFound(blob_id.clone()).into());
        }

        let compressed = std::fs::read(&blob_path)
            .context(format!("Unable to read blob file {}", blob_path.display()))?;

        Self::decompress(compressed.into())
    }

    fn write_blob(&self, blob_path: PathBuf, content: &Bytes) -> anyhow::Result<()> {
        let blob_dir = blob_path
            .parent()
            .context(format!("Invalid blob path {}", blob_path.display()))?;
        let temp_blob_path = blob_dir.join(Self::generate_temp_name());

        let compressed = Self::compress(content)?;

        std::fs::write(&temp_blob_path, &compressed).context(format!(
            "Unable to write blob file {}",
            temp_blob_path.display()
        ))?;

        // rename the temp file to the blob file to make it atomic
        std::fs::rename(&temp_blob_path, &blob_path).context(format!(
            "Unable to rename blob file to {}",
            blob_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: &Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(data)
            .context("Unable to compress blob content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing blob content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress blob content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        static COUNTER: AtomicU32 = AtomicU32::new(0);

        format!(
            "tmp-blob-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        )
    }
}
