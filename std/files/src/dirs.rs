//! Directory operations on resolved paths.

use crate::entry::{self, DirEntry, EntryKind};
use crate::error::FsError;
use crate::files::entry_kind;
use crate::validate::ResolvedPath;
use serde::Serialize;
use std::fmt;

/// Require an existing directory at `path`.
pub(crate) async fn require_dir(path: &ResolvedPath) -> Result<(), FsError> {
    match entry_kind(path).await? {
        Some(EntryKind::Directory) => Ok(()),
        Some(EntryKind::File) => Err(FsError::TypeMismatch {
            expected: EntryKind::Directory,
            path: path.to_path_buf(),
        }),
        None => Err(FsError::NotFound {
            kind: EntryKind::Directory,
            path: path.to_path_buf(),
        }),
    }
}

/// Create a directory and every missing ancestor.
///
/// Succeeds if the directory already exists.
pub async fn create(path: &ResolvedPath) -> Result<(), FsError> {
    if entry_kind(path).await? == Some(EntryKind::File) {
        return Err(FsError::TypeMismatch {
            expected: EntryKind::Directory,
            path: path.to_path_buf(),
        });
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| FsError::io("creating directory", path.as_path(), e))
}

/// Recursively remove a directory and everything beneath it.
pub async fn delete(path: &ResolvedPath) -> Result<(), FsError> {
    if path.is_root() {
        return Err(FsError::RootProtected);
    }
    require_dir(path).await?;
    tokio::fs::remove_dir_all(path)
        .await
        .map_err(|e| FsError::io("deleting directory", path.as_path(), e))
}

/// The immediate children of one directory.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    /// The path as the caller wrote it.
    pub path: String,
    pub entries: Vec<DirEntry>,
}

/// List the immediate children of a directory, sorted by name.
pub async fn list(path: &ResolvedPath, display: &str) -> Result<Listing, FsError> {
    require_dir(path).await?;
    let entries = entry::read_entries(path).await?;
    Ok(Listing {
        path: display.to_owned(),
        entries,
    })
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Contents of directory: {}", self.path)?;
        writeln!(f)?;
        if self.entries.is_empty() {
            return f.write_str("(empty directory)");
        }
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
