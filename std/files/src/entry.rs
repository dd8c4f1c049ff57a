//! Directory entries, read fresh on every call.

use crate::error::FsError;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
        }
    }
}

/// A single child of a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Size in bytes, files only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl fmt::Display for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.size) {
            (EntryKind::Directory, _) => write!(f, "{}/", self.name),
            (EntryKind::File, Some(size)) => write!(f, "{} ({size} bytes)", self.name),
            (EntryKind::File, None) => f.write_str(&self.name),
        }
    }
}

/// Read the immediate children of `dir`, sorted by name.
///
/// Entry kinds come from the entry itself, so a symlink to a directory is
/// listed as a file and never descended into.
pub async fn read_entries(dir: &Path) -> Result<Vec<DirEntry>, FsError> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| FsError::io("reading directory", dir, e))?;
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .map_err(|e| FsError::io("reading directory", dir, e))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| FsError::io("reading entry", entry.path(), e))?;
        let dir_entry = if file_type.is_dir() {
            DirEntry {
                name,
                kind: EntryKind::Directory,
                size: None,
            }
        } else {
            DirEntry {
                name,
                kind: EntryKind::File,
                size: entry.metadata().await.ok().map(|meta| meta.len()),
            }
        };
        entries.push(dir_entry);
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
