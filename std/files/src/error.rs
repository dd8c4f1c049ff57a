//! Domain failures shared by every operation.

use crate::entry::EntryKind;
use crate::validate::ValidateError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failure category reported alongside every error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Argument,
    ContainmentViolation,
    NotFound,
    TypeMismatch,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Argument => "argument",
            Self::ContainmentViolation => "containment_violation",
            Self::NotFound => "not_found",
            Self::TypeMismatch => "type_mismatch",
            Self::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from file and directory operations.
#[derive(Error, Debug)]
pub enum FsError {
    /// The path failed resolution.
    #[error("invalid path: {0}")]
    InvalidPath(#[from] ValidateError),
    /// The workspace root itself may not be removed.
    #[error("access denied: refusing to delete the workspace root")]
    RootProtected,
    /// The target does not exist.
    #[error("{kind} not found: {}", path.display())]
    NotFound { kind: EntryKind, path: PathBuf },
    /// The target exists but is the wrong kind of entry.
    #[error("path is not a {expected}: {}", path.display())]
    TypeMismatch { expected: EntryKind, path: PathBuf },
    /// Any other failure reported by the OS.
    #[error("error {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPath(ValidateError::NullByte) => ErrorKind::Argument,
            Self::InvalidPath(_) | Self::RootProtected => ErrorKind::ContainmentViolation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
