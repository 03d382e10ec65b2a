//! Working directory access
//!
//! The working directory is external, mutable state shared with the user
//! between invocations. The engine only reads and overwrites tracked
//! files, deletes pruned ones and enumerates plain files for
//! untracked-file checks; it re-validates its assumptions before every
//! mutation because the directory may have changed arbitrarily since the
//! last commit.

use anyhow::Context;
use bytes::Bytes;
use std::path::Path;
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".grit", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, file_path: &str) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Unable to read file {}", full_path.display()))?;

        Ok(content.into())
    }

    pub fn write_file(&self, file_path: &str, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }

        std::fs::write(&full_path, content)
            .with_context(|| format!("Unable to write file {}", full_path.display()))
    }

    /// Delete a working-directory file; missing files are fine
    pub fn delete_file(&self, file_path: &str) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.exists() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Unable to delete file {}", full_path.display()))?;
        }

        Ok(())
    }

    /// Enumerate the plain files of the working directory, in name order
    pub fn list_plain_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(self.path.as_ref())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| Self::check_if_not_ignored(entry.file_name().to_str()))
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    fn check_if_not_ignored(name: Option<&str>) -> Option<String> {
        let name = name?;

        if IGNORED_PATHS.contains(&name) {
            None
        } else {
            Some(name.to_string())
        }
    }
}
