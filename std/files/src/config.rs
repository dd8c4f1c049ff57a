//! Workspace configuration, built once at startup.

use crate::validate::{self, ResolvedPath, ValidateError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while building a [`WorkspaceConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The root could not be resolved to an absolute path.
    #[error("error resolving workspace path {}: {source}", path.display())]
    Unresolvable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The root exists but is not a directory.
    #[error("workspace path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },
}

/// The single directory every operation is confined to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    root: PathBuf,
}

impl WorkspaceConfig {
    /// Canonicalize `root` and check that it is an existing directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = root.as_ref();
        let root = path
            .canonicalize()
            .map_err(|source| ConfigError::Unresolvable {
                path: path.to_path_buf(),
                source,
            })?;
        if !root.is_dir() {
            return Err(ConfigError::NotADirectory { path: root });
        }
        Ok(Self { root })
    }

    /// The absolute, canonical workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a caller-supplied path inside this workspace.
    pub fn resolve(&self, user_path: &str) -> Result<ResolvedPath, ValidateError> {
        validate::resolve(&self.root, user_path)
    }
}
