//! Error types for JDK archive installation.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type alias using `InstallError`.
pub type Result<T> = std::result::Result<T, InstallError>;

/// Errors that can occur while installing a JDK archive.
#[derive(Error, Debug)]
pub enum InstallError {
    /// Source archive path does not exist.
    #[error("source archive not found: {path}")]
    SourceNotFound {
        /// The missing archive path.
        path: PathBuf,
    },

    /// Source archive path is a directory, not a regular file.
    #[error("source archive is a directory: {path}")]
    SourceIsDirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A required external tool could not be located.
    #[error("required tool not found on PATH: {tool}")]
    ToolNotFound {
        /// Name or path of the tool.
        tool: String,
    },

    /// An external tool exited with a non-zero status.
    #[error("tool '{tool}' failed with exit code {}: {stderr}", .code.map_or_else(|| String::from("none (terminated by signal)"), |c| c.to_string()))]
    ToolFailed {
        /// Name or path of the tool.
        tool: String,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Captured standard error output.
        stderr: String,
    },

    /// An external tool did not finish within the caller-supplied deadline.
    #[error("tool '{tool}' timed out after {}s", .limit.as_secs())]
    ToolTimeout {
        /// Name or path of the tool.
        tool: String,
        /// The deadline that expired.
        limit: Duration,
    },

    /// The staging directory did not contain exactly one entry after the
    /// first extraction pass.
    #[error("staging directory {staging} contains {entries} entries, expected exactly 1")]
    StagingAmbiguous {
        /// The staging directory.
        staging: PathBuf,
        /// Number of entries found.
        entries: usize,
    },

    /// Extraction created zero or multiple new top-level directories, so
    /// the JDK root cannot be determined.
    #[error("cannot determine extracted JDK root: found {} new top-level directories", .candidates.len())]
    AmbiguousRoot {
        /// The new top-level directories that were found.
        candidates: Vec<PathBuf>,
    },

    /// A `.pack` file could not be converted to `.jar`.
    #[error("pack conversion failed for {path}: {detail}")]
    PackConversion {
        /// The `.pack` file that failed to convert.
        path: PathBuf,
        /// Tool output or error detail.
        detail: String,
    },

    /// Archive is corrupted or not in the expected format.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InstallError {
    /// Returns `true` if this error was raised before any side effect on
    /// the destination directory.
    ///
    /// Precondition errors mean the destination was never touched and the
    /// operation can be retried with corrected inputs.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. } | Self::SourceIsDirectory { .. }
        )
    }

    /// Returns `true` if this error originates from an external tool
    /// (missing, failed, or timed out) rather than from this library.
    #[must_use]
    pub const fn is_tool_failure(&self) -> bool {
        matches!(
            self,
            Self::ToolNotFound { .. }
                | Self::ToolFailed { .. }
                | Self::ToolTimeout { .. }
                | Self::PackConversion { .. }
        )
    }

    /// Returns the exit code of the failing tool, if applicable.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ToolFailed { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for InstallError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io_err) => Self::Io(io_err),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}
