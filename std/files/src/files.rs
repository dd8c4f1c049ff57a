//! Single-file operations on resolved paths.

use crate::entry::EntryKind;
use crate::error::FsError;
use crate::validate::ResolvedPath;
use std::io::ErrorKind;
use std::path::Path;

/// Look up what, if anything, lives at `path`.
pub async fn entry_kind(path: &Path) -> Result<Option<EntryKind>, FsError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
        Ok(_) => Ok(Some(EntryKind::File)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FsError::io("accessing", path, e)),
    }
}

/// Require an existing file at `path`.
async fn require_file(path: &ResolvedPath) -> Result<(), FsError> {
    match entry_kind(path).await? {
        Some(EntryKind::File) => Ok(()),
        Some(EntryKind::Directory) => Err(FsError::TypeMismatch {
            expected: EntryKind::File,
            path: path.to_path_buf(),
        }),
        None => Err(FsError::NotFound {
            kind: EntryKind::File,
            path: path.to_path_buf(),
        }),
    }
}

/// Read the full contents of a file.
pub async fn read(path: &ResolvedPath) -> Result<Vec<u8>, FsError> {
    require_file(path).await?;
    tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => FsError::NotFound {
            kind: EntryKind::File,
            path: path.to_path_buf(),
        },
        _ => FsError::io("reading file", path.as_path(), e),
    })
}

/// Write `content`, replacing any existing file and creating missing parents.
///
/// Returns the number of bytes written.
pub async fn write(path: &ResolvedPath, content: &[u8]) -> Result<usize, FsError> {
    if path.is_root() || entry_kind(path).await? == Some(EntryKind::Directory) {
        return Err(FsError::TypeMismatch {
            expected: EntryKind::File,
            path: path.to_path_buf(),
        });
    }
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| FsError::io("creating directory", parent, e))?;
    }
    tokio::fs::write(path, content)
        .await
        .map_err(|e| FsError::io("writing file", path.as_path(), e))?;
    Ok(content.len())
}

/// Remove exactly one file. Directories are never removed here.
pub async fn delete(path: &ResolvedPath) -> Result<(), FsError> {
    require_file(path).await?;
    tokio::fs::remove_file(path)
        .await
        .map_err(|e| FsError::io("deleting file", path.as_path(), e))
}
