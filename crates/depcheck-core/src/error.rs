use std::path::PathBuf;
use thiserror::Error;

/// Error codes for failures that abort a check.
pub mod codes {
    pub const SNAPSHOT_READ_FAILED: &str = "SNAPSHOT_READ_FAILED";
    pub const SNAPSHOT_NOT_DIRECTORY: &str = "SNAPSHOT_NOT_DIRECTORY";
    pub const CHECK_TASK_FAILED: &str = "CHECK_TASK_FAILED";
}

/// Core error type for depcheck operations.
///
/// Problems with the manifest's content are never errors; they are reported
/// as findings. This type only covers failures of the environment around the
/// check, such as an unreadable `node_modules` directory.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Failed to read installed packages at {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Installed package directory {path} is not a directory")]
    SnapshotNotDirectory { path: PathBuf },

    #[error("Check task failed: {0}")]
    Task(String),
}

impl CheckError {
    /// Get the stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::SnapshotRead { .. } => codes::SNAPSHOT_READ_FAILED,
            Self::SnapshotNotDirectory { .. } => codes::SNAPSHOT_NOT_DIRECTORY,
            Self::Task(_) => codes::CHECK_TASK_FAILED,
        }
    }

    pub(crate) fn snapshot_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SnapshotRead {
            path: path.into(),
            source,
        }
    }
}
