//! Path containment for the files MCP server.
//!
//! Every operation turns the caller's relative path into a [`ResolvedPath`]
//! through [`resolve`] before touching the filesystem. Resolution is purely
//! lexical: nothing is read from disk and symlinks are not followed.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from path resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidateError {
    /// The path would land outside the workspace root.
    #[error("access denied: {0:?} is outside the workspace folder")]
    OutsideWorkspace(String),
    /// The path contains a null byte.
    #[error("path contains null byte")]
    NullByte,
}

/// An absolute path proven to be the workspace root or one of its descendants.
///
/// Only [`resolve`] can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    path: PathBuf,
    is_root: bool,
}

impl ResolvedPath {
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Whether this path is the workspace root itself.
    pub fn is_root(&self) -> bool {
        self.is_root
    }
}

impl Deref for ResolvedPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.path
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Resolve a caller-supplied path against the workspace root.
///
/// Steps:
/// 1. Reject paths containing null bytes
/// 2. Clean the path lexically, treating `\` as a separator
/// 3. Drop any leading `/`, `\` or drive prefix so the value is relative
/// 4. Join onto `root` and collapse the `..` segments that survived cleaning
/// 5. Verify the result is `root` or lies beneath it, component by component
///
/// `root` must already be absolute and clean, as [`WorkspaceConfig`] guarantees.
///
/// [`WorkspaceConfig`]: crate::config::WorkspaceConfig
pub fn resolve(root: &Path, user_path: &str) -> Result<ResolvedPath, ValidateError> {
    if user_path.contains('\0') {
        return Err(ValidateError::NullByte);
    }

    let mut joined = root.to_path_buf();
    for segment in clean_relative(user_path) {
        if segment == ".." {
            joined.pop();
        } else {
            joined.push(segment);
        }
    }

    // `Path::starts_with` compares whole components, so `/work` never
    // matches a sibling such as `/workspace2`.
    match joined.strip_prefix(root) {
        Ok(rest) => Ok(ResolvedPath {
            is_root: rest.as_os_str().is_empty(),
            path: joined,
        }),
        Err(_) => Err(ValidateError::OutsideWorkspace(user_path.to_owned())),
    }
}

/// Lexically clean `path` into relative segments.
///
/// A rooted input (leading separator or drive prefix) cannot climb above its
/// root, so leading `..` segments are dropped for it. A relative input keeps
/// them, and the join in [`resolve`] decides whether they escape.
fn clean_relative(path: &str) -> Vec<&str> {
    let (rooted, rest) = split_root(path);

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            normal => segments.push(normal),
        }
    }
    segments
}

/// Split off a leading root marker, reporting whether one was present.
fn split_root(path: &str) -> (bool, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return (true, &path[2..]);
    }
    match path.strip_prefix(['/', '\\']) {
        Some(rest) => (true, rest),
        None => (false, path),
    }
}
