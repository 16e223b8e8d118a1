use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::metainfo::MetainfoError;

/// Errors that abort torrent creation.
///
/// Every variant is fatal: no `.torrent` file is written when one occurs.
#[derive(Debug, Error)]
pub enum CreateError {
    /// The target path does not exist.
    #[error("target not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Opening, reading or listing a path failed.
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The assembled record could not be serialized.
    #[error("encoding failed: {0}")]
    Encoding(#[from] MetainfoError),

    /// A path segment is not valid UTF-8, or the target has no base name.
    #[error("invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("piece length must be greater than zero")]
    InvalidPieceLength,

    /// The target exists but is neither a regular file nor a directory.
    #[error("not a regular file or directory: {}", .0.display())]
    UnsupportedTarget(PathBuf),

    #[error("directory nesting exceeds {max} levels at {}", path.display())]
    DirectoryTooDeep { path: PathBuf, max: usize },

    /// A directory is reachable from itself through a symlink.
    #[error("symlink cycle at {}", .0.display())]
    SymlinkCycle(PathBuf),

    /// Files changed size between enumeration and hashing.
    #[error("enumerated {expected} bytes but hashed {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    /// The hashing task went away while paths were still being sent.
    #[error("hasher stopped before enumeration finished")]
    HasherStopped,

    #[error("background task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl CreateError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        CreateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Like `io`, but a missing path is reported as
    /// [`CreateError::NotFound`]. Only used for the target itself; files that
    /// vanish mid-run are I/O errors.
    pub(crate) fn target(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return CreateError::NotFound(path.to_path_buf());
        }
        Self::io(path, source)
    }
}
