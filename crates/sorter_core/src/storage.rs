//! Local directory access used by the classifier session.
//!
//! The session never touches `std::fs` directly; it goes through
//! [`DirectoryAccess`], which exposes the handful of operations the sorter
//! needs: list immediate children, read a file, get-or-create a
//! subdirectory, and create-or-overwrite a file.

use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::error::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

pub trait DirectoryAccess {
    /// Lists the immediate children of `dir` in whatever order the backend yields.
    fn entries(&self, dir: &Path) -> Result<Vec<DirEntry>, StorageError>;

    /// Reads the full contents of `dir/name`.
    fn read_file(&self, dir: &Path, name: &str) -> Result<Vec<u8>, StorageError>;

    /// Returns `parent/name`, creating the directory if it does not exist yet.
    fn directory(&self, parent: &Path, name: &str) -> Result<PathBuf, StorageError>;

    /// Creates `dir/name` or replaces its entire contents with `bytes`.
    fn write_file(&self, dir: &Path, name: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// [`DirectoryAccess`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectory;

impl DirectoryAccess for FsDirectory {
    fn entries(&self, dir: &Path) -> Result<Vec<DirEntry>, StorageError> {
        if !dir.is_dir() {
            return Err(StorageError::NotADirectory(dir.to_path_buf()));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("walkdir error: {}", e);
                    continue;
                }
            };
            let Some(name) = entry.file_name().to_str() else {
                tracing::warn!("skipping non UTF-8 name: {}", entry.path().display());
                continue;
            };
            let path = entry.path();
            let kind = if path.is_file() {
                EntryKind::File
            } else if path.is_dir() {
                EntryKind::Directory
            } else {
                continue;
            };
            entries.push(DirEntry {
                name: name.to_string(),
                kind,
            });
        }
        Ok(entries)
    }

    fn read_file(&self, dir: &Path, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = child_path(dir, name)?;
        fs::read(&path).map_err(|e| StorageError::io("read", path, e))
    }

    fn directory(&self, parent: &Path, name: &str) -> Result<PathBuf, StorageError> {
        let path = child_path(parent, name)?;
        fs::create_dir_all(&path).map_err(|e| StorageError::io("create directory", &path, e))?;
        Ok(path)
    }

    fn write_file(&self, dir: &Path, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = child_path(dir, name)?;
        fs::write(&path, bytes).map_err(|e| StorageError::io("write", path, e))
    }
}

/// Joins `name` onto `dir`, refusing anything but a single plain component.
fn child_path(dir: &Path, name: &str) -> Result<PathBuf, StorageError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(dir.join(name)),
        _ => Err(StorageError::InvalidName(name.to_string())),
    }
}
